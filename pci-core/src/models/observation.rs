use super::{DistressType, Severity, Unit};

/// A single distress observation recorded during a field inspection.
///
/// Observations are validated on construction: the magnitude is finite and
/// non-negative, the unit agrees with the catalog, and a severity is present
/// exactly when the distress is graded by severity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ObservationDto", into = "ObservationDto")
)]
pub struct Observation {
    distress: DistressType,
    severity: Option<Severity>,
    magnitude: f64,
    unit: Unit,
}

impl Observation {
    /// Creates an observation measured in the catalog unit of the distress
    pub fn new(
        distress: DistressType,
        severity: Option<Severity>,
        magnitude: f64,
    ) -> Result<Self, ObservationError> {
        Self::with_unit(distress, severity, magnitude, distress.unit())
    }

    /// Creates an observation with an explicitly stated unit, which must match the catalog
    pub fn with_unit(
        distress: DistressType,
        severity: Option<Severity>,
        magnitude: f64,
        unit: Unit,
    ) -> Result<Self, ObservationError> {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(ObservationError::Magnitude(magnitude));
        }
        if unit != distress.unit() {
            return Err(ObservationError::UnitMismatch {
                distress,
                expected: distress.unit(),
                found: unit,
            });
        }
        match (distress.has_severity(), severity) {
            (true, None) => Err(ObservationError::MissingSeverity(distress)),
            (false, Some(_)) => Err(ObservationError::UnexpectedSeverity(distress)),
            _ => Ok(Self {
                distress,
                severity,
                magnitude,
                unit,
            }),
        }
    }

    /// The observed distress
    pub fn distress(&self) -> DistressType {
        self.distress
    }

    /// The observed severity, if the distress is graded by severity
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// The raw quantity (square feet, linear feet or a count)
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// The unit of the raw quantity
    pub fn unit(&self) -> Unit {
        self.unit
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationDto {
    /// The catalog identifier of the distress
    #[cfg_attr(feature = "schemars", schemars(with = "u8"))]
    pub distress: DistressType,
    /// The severity code, omitted for distresses without severity levels
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub severity: Option<Severity>,
    /// The raw quantity
    pub magnitude: f64,
    /// The unit of the quantity (defaults to the catalog unit)
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: Option<Unit>,
}

impl TryFrom<ObservationDto> for Observation {
    type Error = ObservationError;

    fn try_from(value: ObservationDto) -> Result<Self, Self::Error> {
        let ObservationDto {
            distress,
            severity,
            magnitude,
            unit,
        } = value;
        Self::with_unit(
            distress,
            severity,
            magnitude,
            unit.unwrap_or(distress.unit()),
        )
    }
}

impl From<Observation> for ObservationDto {
    fn from(value: Observation) -> Self {
        Self {
            distress: value.distress,
            severity: value.severity,
            magnitude: value.magnitude,
            unit: Some(value.unit),
        }
    }
}

/// Errors that can occur when recording distress observations
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ObservationError {
    /// Error when a raw magnitude is negative or not a finite number
    #[error("Magnitude must be finite and non-negative, got {0}")]
    Magnitude(f64),
    /// Error when a sample area is not a finite, positive number
    #[error("Sample area must be finite and positive, got {0}")]
    SampleArea(f64),
    /// Error when the stated unit disagrees with the catalog
    #[error("{distress} is measured by {expected}, not {found}")]
    UnitMismatch {
        /// The observed distress
        distress: DistressType,
        /// The unit declared by the catalog
        expected: Unit,
        /// The unit that was supplied
        found: Unit,
    },
    /// Error when a severity-graded distress has no severity
    #[error("{0} requires a severity level")]
    MissingSeverity(DistressType),
    /// Error when a distress without severity levels is given one
    #[error("{0} does not use severity levels")]
    UnexpectedSeverity(DistressType),
    /// Error when a distress identifier is not in the catalog
    #[error("Unknown distress id: {0}")]
    UnknownDistress(u8),
    /// Error when no catalog entry matches a name
    #[error("Unknown distress name: {0}")]
    UnknownDistressName(String),
    /// Error when a severity code cannot be parsed
    #[error("Unknown severity code: {0}")]
    UnknownSeverity(String),
}
