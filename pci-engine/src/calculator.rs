use crate::{
    CdvIteration, CdvIterator, CurveStore, PciError, Settings, SettingsError, cdv::max_of,
    density,
};
use pci_core::models::{DistressType, SampleUnit, Severity};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

const PCI_RANGE: (f64, f64) = (0.0, 100.0);

/// The deduct value derived from one observation of a sample unit
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct DeductValueEntry {
    /// The position of the observation within its sample unit
    pub observation: usize,
    /// The observed distress
    #[cfg_attr(feature = "schemars", schemars(with = "u8"))]
    pub distress: DistressType,
    /// The observed severity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// The density of the observation, in percent of the sample area
    pub density: f64,
    /// The interpolated deduct value
    pub deduct_value: f64,
}

/// The PCI of a sample unit, along with the intermediate values that produced it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct SamplePci {
    /// The identifier of the sample unit, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The area of the sample unit
    pub area: f64,
    /// The Pavement Condition Index, within [0, 100]
    pub pci: f64,
    /// The largest corrected deduct value over all iterations
    pub max_cdv: f64,
    /// One entry per observation, in observation order
    pub deduct_values: Vec<DeductValueEntry>,
    /// The passes of the CDV reduction, in order
    pub iterations: Vec<CdvIteration>,
}

/// The area-weighted PCI of a section, along with its per-sample results
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct SectionPci {
    /// The area-weighted Pavement Condition Index, within [0, 100]
    pub pci: f64,
    /// The sum of the sample areas
    pub total_area: f64,
    /// The result of each sample unit, in input order
    pub samples: Vec<SamplePci>,
}

/// Computes sample-unit and section PCIs against a set of curves.
///
/// The calculator holds no state of its own beyond a borrowed, read-only
/// [`CurveStore`] and its [`Settings`]; identical inputs always produce identical
/// results, and independent sample units may be evaluated concurrently.
#[derive(Clone, Debug)]
pub struct Calculator<'s> {
    store: &'s CurveStore,
    settings: Settings,
}

impl<'s> Calculator<'s> {
    /// Creates a calculator with default settings
    pub fn new(store: &'s CurveStore) -> Self {
        Self {
            store,
            settings: Settings::default(),
        }
    }

    /// Replaces the settings, validating them first
    pub fn with_settings(mut self, settings: Settings) -> Result<Self, SettingsError> {
        self.settings = settings.validate()?;
        Ok(self)
    }

    /// Computes the density and deduct value of every observation in a sample unit
    pub fn deduct_values(&self, sample: &SampleUnit) -> Result<Vec<DeductValueEntry>, PciError> {
        sample
            .observations()
            .iter()
            .enumerate()
            .map(|(idx, observation)| {
                let density = density(observation, sample.area())?;
                let deduct_value = self.store.deduct_value(
                    observation.distress(),
                    observation.severity(),
                    density,
                )?;
                event!(
                    Level::DEBUG,
                    distress = observation.distress().id(),
                    density,
                    deduct_value,
                    "deduct value"
                );
                Ok(DeductValueEntry {
                    observation: idx,
                    distress: observation.distress(),
                    severity: observation.severity(),
                    density,
                    deduct_value,
                })
            })
            .collect()
    }

    /// Computes the PCI of a sample unit: `100 - max CDV`, clamped into [0, 100]
    pub fn sample_pci(&self, sample: &SampleUnit) -> Result<SamplePci, PciError> {
        let deduct_values = self.deduct_values(sample)?;

        let mut values = deduct_values
            .iter()
            .map(|entry| entry.deduct_value)
            .filter(|&dv| !(self.settings.drop_zero_deducts && dv == 0.0))
            .collect::<Vec<_>>();

        // Largest first, so that truncation keeps the most severe deducts
        values.sort_unstable_by(|a, b| b.total_cmp(a));
        if let Some(allowed) = values
            .first()
            .and_then(|&hdv| self.settings.allowed_deducts(hdv))
        {
            values.truncate(allowed);
        }

        let iterations = CdvIterator::new(self.store)
            .with_threshold(self.settings.significance_threshold)?
            .iterations(&values)?;
        let max_cdv = max_of(&iterations);

        let raw = 100.0 - max_cdv;
        let pci = raw.clamp(PCI_RANGE.0, PCI_RANGE.1);
        if pci != raw {
            event!(Level::WARN, raw, pci, "sample PCI clamped");
        }

        Ok(SamplePci {
            id: sample.id().map(str::to_owned),
            area: sample.area(),
            pci,
            max_cdv,
            deduct_values,
            iterations,
        })
    }

    /// Computes the area-weighted PCI of a collection of sample units:
    /// `Σ(pci_i * area_i) / Σ(area_i)`
    ///
    /// Fails with [`PciError::EmptySection`] if there are no sample units or their
    /// total area is zero.
    pub fn section_pci<'a>(
        &self,
        samples: impl IntoIterator<Item = &'a SampleUnit>,
    ) -> Result<SectionPci, PciError> {
        let samples = samples
            .into_iter()
            .map(|sample| self.sample_pci(sample))
            .collect::<Result<Vec<_>, _>>()?;

        let total_area = samples.iter().map(|sample| sample.area).sum::<f64>();
        if samples.is_empty() || total_area <= 0.0 {
            return Err(PciError::EmptySection);
        }

        // Weighting by area fractions keeps a single sample's PCI exact
        let pci = samples
            .iter()
            .map(|sample| sample.pci * (sample.area / total_area))
            .sum::<f64>()
            .clamp(PCI_RANGE.0, PCI_RANGE.1);

        Ok(SectionPci {
            pci,
            total_area,
            samples,
        })
    }
}
