use super::{DistressType, Observation, ObservationError, Severity};

/// A pavement sample unit: a surveyed area and the distresses observed within it.
///
/// The area is fixed at creation and is always finite and positive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SampleUnitDto", into = "SampleUnitDto")
)]
pub struct SampleUnit {
    id: Option<String>,
    area: f64,
    observations: Vec<Observation>,
}

impl SampleUnit {
    /// Creates an empty sample unit covering `area` square feet
    pub fn new(area: f64) -> Result<Self, ObservationError> {
        if area.is_finite() && area > 0.0 {
            Ok(Self {
                id: None,
                area,
                observations: Vec::new(),
            })
        } else {
            Err(ObservationError::SampleArea(area))
        }
    }

    /// Attaches an identifier to the sample unit
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends an already validated observation
    pub fn push(&mut self, observation: Observation) -> &mut Self {
        self.observations.push(observation);
        self
    }

    /// Records an observation from raw survey codes.
    ///
    /// The distress is resolved from the catalog by `distress_id`, the severity is
    /// parsed from its code (`"L"`, `"M"`, `"H"`) and the quantity is taken to be
    /// in the catalog unit of the distress.
    pub fn add_observation(
        &mut self,
        distress_id: u8,
        severity: Option<&str>,
        quantity: f64,
    ) -> Result<&mut Self, ObservationError> {
        let distress = DistressType::from_id(distress_id)?;
        let severity = severity.map(str::parse::<Severity>).transpose()?;
        let observation = Observation::new(distress, severity, quantity)?;
        Ok(self.push(observation))
    }

    /// The identifier of the sample unit, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The surveyed area in square feet
    pub fn area(&self) -> f64 {
        self.area
    }

    /// The observations, in the order they were recorded
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleUnitDto {
    /// An optional identifier
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,
    /// The surveyed area in square feet
    pub area: f64,
    /// The recorded observations
    #[cfg_attr(feature = "serde", serde(default))]
    #[cfg_attr(feature = "schemars", schemars(with = "Vec<crate::models::ObservationDto>"))]
    pub observations: Vec<Observation>,
}

impl TryFrom<SampleUnitDto> for SampleUnit {
    type Error = ObservationError;

    fn try_from(value: SampleUnitDto) -> Result<Self, Self::Error> {
        let mut sample = Self::new(value.area)?;
        sample.id = value.id;
        sample.observations = value.observations;
        Ok(sample)
    }
}

impl From<SampleUnit> for SampleUnitDto {
    fn from(value: SampleUnit) -> Self {
        Self {
            id: value.id,
            area: value.area,
            observations: value.observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_must_be_positive() {
        assert_eq!(
            SampleUnit::new(0.0).unwrap_err(),
            ObservationError::SampleArea(0.0)
        );
        assert!(SampleUnit::new(-10.0).is_err());
        assert!(SampleUnit::new(f64::INFINITY).is_err());
        assert!(SampleUnit::new(2500.0).is_ok());
    }

    #[test]
    fn test_add_observation() {
        let mut sample = SampleUnit::new(2500.0).unwrap().with_id("SU-001");
        sample
            .add_observation(1, Some("M"), 150.0)
            .unwrap()
            .add_observation(10, Some("L"), 75.0)
            .unwrap()
            .add_observation(12, None, 30.0)
            .unwrap();

        assert_eq!(sample.id(), Some("SU-001"));
        assert_eq!(sample.observations().len(), 3);
        assert_eq!(
            sample.observations()[1].distress(),
            DistressType::LongitudinalTransverseCracking
        );
    }

    #[test]
    fn test_add_observation_errors() {
        let mut sample = SampleUnit::new(2500.0).unwrap();
        assert_eq!(
            sample.add_observation(25, Some("L"), 1.0).unwrap_err(),
            ObservationError::UnknownDistress(25)
        );
        assert_eq!(
            sample.add_observation(1, Some("Q"), 1.0).unwrap_err(),
            ObservationError::UnknownSeverity("Q".to_owned())
        );
        assert_eq!(
            sample.add_observation(1, None, 1.0).unwrap_err(),
            ObservationError::MissingSeverity(DistressType::AlligatorCracking)
        );
        assert!(sample.observations().is_empty());
    }

    #[test]
    fn test_deserialize() {
        let raw = r#"{
            "id": "SU-002",
            "area": 2500.0,
            "observations": [
                { "distress": 3, "severity": "L", "magnitude": 200.0 },
                { "distress": 19, "severity": "L", "magnitude": 300.0 }
            ]
        }"#;
        let sample = serde_json::from_str::<SampleUnit>(raw).unwrap();
        assert_eq!(sample.area(), 2500.0);
        assert_eq!(sample.observations().len(), 2);

        assert!(serde_json::from_str::<SampleUnit>(r#"{ "area": 0.0 }"#).is_err());
    }
}
