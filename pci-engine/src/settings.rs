//! Calculation settings.
//!
//! Settings are merged from several sources with a clear precedence order:
//! built-in defaults, an optional configuration file, and environment variables.

use crate::{DEFAULT_SIGNIFICANCE_THRESHOLD, cdv::is_valid_threshold};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables of the PCI calculation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Deduct values above this count towards q; demoted values are set to it
    pub significance_threshold: f64,

    /// Keep only the `m = 1 + (9/98)(100 - HDV)` largest deduct values, where
    /// HDV is the highest deduct value of the sample unit
    pub limit_deduct_count: bool,

    /// Skip deduct values of exactly zero before the CDV reduction
    pub drop_zero_deducts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
            limit_deduct_count: false,
            drop_zero_deducts: false,
        }
    }
}

impl Settings {
    /// Load settings from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. The configuration file at `path`, if given (TOML or JSON, by extension)
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern `PCI_<KEY>`, e.g.
    ///
    /// ```bash
    /// export PCI_SIGNIFICANCE_THRESHOLD=2.0
    /// export PCI_LIMIT_DEDUCT_COUNT=true
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on the config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path));
            } else {
                return Err(SettingsError::MissingFile(path.display().to_string()));
            }
        }

        // Override with environment variables
        config = config.add_source(
            config::Environment::with_prefix("PCI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = config.build()?.try_deserialize::<Self>()?;
        settings.validate()
    }

    /// Checks that the settings describe a usable calculation
    pub fn validate(self) -> Result<Self, SettingsError> {
        if is_valid_threshold(self.significance_threshold) {
            Ok(self)
        } else {
            Err(SettingsError::Threshold(self.significance_threshold))
        }
    }

    /// The number of deduct values to keep for a sample unit whose highest deduct value is `hdv`
    pub(crate) fn allowed_deducts(&self, hdv: f64) -> Option<usize> {
        if !self.limit_deduct_count {
            return None;
        }
        let m = 1.0 + (9.0 / 98.0) * (100.0 - hdv);
        Some((m.floor() as usize).max(1))
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Error when the given configuration file does not exist
    #[error("Config file {0} does not exist")]
    MissingFile(String),
    /// Error from reading or merging configuration sources
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    /// Error when the significance threshold is unusable
    #[error("significance threshold must lie within [0, 100), got {0}")]
    Threshold(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::io::Write as _;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.significance_threshold, 2.0);
        assert!(!settings.limit_deduct_count);
        assert!(!settings.drop_zero_deducts);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "limit_deduct_count = true").unwrap();
        writeln!(file, "significance_threshold = 2.5").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.significance_threshold, 2.5);
        assert!(settings.limit_deduct_count);
        assert!(!settings.drop_zero_deducts);
    }

    #[test]
    fn test_load_rejects_bad_threshold() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(file, r#"{{ "significance_threshold": 150.0 }}"#).unwrap();

        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(SettingsError::Threshold(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/pci-settings.toml");
        assert!(matches!(
            Settings::load(Some(path)),
            Err(SettingsError::MissingFile(_))
        ));
    }

    #[rstest]
    #[case(100.0, 1)]
    #[case(90.0, 1)]
    #[case(50.0, 5)]
    #[case(0.0, 10)]
    fn allowed_deducts(#[case] hdv: f64, #[case] expected: usize) {
        let settings = Settings {
            limit_deduct_count: true,
            ..Settings::default()
        };
        assert_eq!(settings.allowed_deducts(hdv), Some(expected));
        assert_eq!(Settings::default().allowed_deducts(hdv), None);
    }
}
