use super::SampleUnit;

/// A pavement section: the sample units whose PCIs are rolled up by area.
///
/// A section stores only its inputs; the section PCI is derived on demand and
/// never cached, so it always reflects the current sample units.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PavementSection {
    /// An optional identifier, such as a street segment name
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,
    /// The inspected sample units
    #[cfg_attr(
        feature = "schemars",
        schemars(with = "Vec<crate::models::SampleUnitDto>")
    )]
    pub samples: Vec<SampleUnit>,
}

impl PavementSection {
    /// Creates an empty section
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            samples: Vec::new(),
        }
    }
}

impl FromIterator<SampleUnit> for PavementSection {
    fn from_iter<I: IntoIterator<Item = SampleUnit>>(iter: I) -> Self {
        Self {
            id: None,
            samples: iter.into_iter().collect(),
        }
    }
}
