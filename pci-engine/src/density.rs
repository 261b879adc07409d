use pci_core::models::{Observation, ObservationError};

/// Express an observation as a density: percent of quantity per sample area.
///
/// Area and length distresses use their square or linear footage; count
/// distresses (potholes) use the number of occurrences. In every case the
/// density is `100 * magnitude / sample_area`. Densities above 100 are valid
/// and are left for the deduct curves to clamp.
///
/// # Errors
///
/// Returns an `ObservationError` if the sample area is not finite and positive,
/// or if the magnitude is not finite and non-negative.
pub fn density(observation: &Observation, sample_area: f64) -> Result<f64, ObservationError> {
    if !sample_area.is_finite() || sample_area <= 0.0 {
        return Err(ObservationError::SampleArea(sample_area));
    }

    let magnitude = observation.magnitude();
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(ObservationError::Magnitude(magnitude));
    }

    Ok(100.0 * magnitude / sample_area)
}
