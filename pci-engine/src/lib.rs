#![warn(missing_docs)]
//! An ASTM D6433 Pavement Condition Index (PCI) calculation engine.
//!
//! A calculation flows through the following stages:
//! 1. [`density`] converts each raw observation into a percentage of its sample area,
//! 2. the [`CurveStore`] interpolates a deduct value for every (distress, severity, density),
//! 3. the [`CdvIterator`] reduces the deduct values to a maximum corrected deduct value,
//! 4. the [`Calculator`] turns that into a sample PCI and rolls sample PCIs up by area.
//!
//! Curve data is never built in. It is loaded once into an immutable [`CurveStore`]
//! and passed explicitly to every calculation.

/**
 * Piecewise-linear interpolation with boundary clamping.
 */
mod interpolate;
pub use interpolate::interpolate;

/**
 * Conversion of raw observations into densities.
 */
mod density;
pub use density::density;

/**
 * Storage and lookup of deduct-value and corrected-deduct-value curves.
 */
mod store;
pub use store::{CurveKey, CurveStore};

/**
 * The iterative corrected-deduct-value reduction.
 */
mod cdv;
pub use cdv::{CdvIteration, CdvIterator, DEFAULT_SIGNIFICANCE_THRESHOLD};

/**
 * Sample-unit and section aggregation.
 */
mod calculator;
pub use calculator::{Calculator, DeductValueEntry, SamplePci, SectionPci};

mod error;
pub use error::PciError;

mod settings;
pub use settings::{Settings, SettingsError};

/// Reading curve data from serialized sources
#[cfg(feature = "io")]
pub mod io;

// Re-export the models so that callers need only depend on the engine
pub use pci_core::models::{
    Curve, CurveError, DistressType, Observation, ObservationError, PavementSection, Point,
    SampleUnit, Severity, Unit,
};
