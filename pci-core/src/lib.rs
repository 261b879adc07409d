#![warn(missing_docs)]
//! Models for pavement condition surveys rated with the ASTM D6433 method.
//!
//! This crate holds the vocabulary shared by every stage of a PCI calculation:
//! the closed catalog of asphalt distresses, field observations grouped into
//! sample units and sections, and the validated piecewise-linear curves used
//! for deduct-value and corrected-deduct-value lookups. The arithmetic itself
//! lives in `pci-engine`.

/// Core domain models for pavement condition surveys.
///
/// The models in this module are primarily data structures with validation
/// at construction time, so that downstream computations can rely on their
/// invariants (positive sample areas, non-negative magnitudes, well-formed curves).
pub mod models;
