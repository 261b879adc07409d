use crate::CurveKey;
use pci_core::models::{CurveError, ObservationError};

/// Errors that can occur while computing a PCI
///
/// None of these are transient: each stems from invalid observations or
/// incomplete curve data, and the computation must be repeated with corrected input.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PciError {
    /// Error from validating an observation or sample area
    #[error("invalid observation: {0}")]
    InvalidObservation(#[from] ObservationError),
    /// Error when no curve is registered for a required key
    #[error("no curve registered for {0}")]
    MissingCurve(CurveKey),
    /// Error when a curve's shape is malformed
    #[error("malformed curve data for {key}: {source}")]
    CurveData {
        /// The curve the failure was detected on
        key: CurveKey,
        /// The underlying shape violation
        #[source]
        source: CurveError,
    },
    /// Error when a curve is registered under a key that can never be looked up
    #[error("curves cannot be registered for {0}")]
    InvalidCurveKey(CurveKey),
    /// Error when a significance threshold is not finite or lies outside [0, 100)
    #[error("significance threshold must lie within [0, 100), got {0}")]
    Threshold(f64),
    /// Error when a section has nothing to aggregate
    #[error("section has no sample units or a total area of zero")]
    EmptySection,
}
