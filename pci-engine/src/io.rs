use crate::{CurveStore, PciError};
use pci_core::models::{DistressType, Point, Severity};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// An insertion-ordered map with a fast, non-cryptographic hasher
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

/// A deduct curve as it appears in a curve file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeductCurveEntry {
    /// The catalog id of the distress
    pub distress: DistressType,
    /// The severity, omitted for distresses without severity levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// The (density, deduct value) coordinates
    pub points: Vec<Point>,
}

/// The serialized form of a [`CurveStore`].
///
/// ```json
/// {
///   "deduct": [
///     { "distress": 1, "severity": "L", "points": [[0, 0], [10, 26], [100, 52]] },
///     { "distress": 12, "points": [{ "x": 0, "y": 0 }, { "x": 100, "y": 30 }] }
///   ],
///   "cdv": {
///     "1": [[0, 0], [100, 100]]
///   }
/// }
/// ```
///
/// The points are validated only when the set is converted into a store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSet {
    /// The deduct curves
    #[serde(default)]
    pub deduct: Vec<DeductCurveEntry>,
    /// The CDV curves, keyed by q
    #[serde(default)]
    pub cdv: Map<usize, Vec<Point>>,
}

impl TryFrom<CurveSet> for CurveStore {
    type Error = PciError;

    fn try_from(set: CurveSet) -> Result<Self, Self::Error> {
        let store = set.deduct.into_iter().try_fold(CurveStore::new(), |store, entry| {
            store.with_deduct_curve(entry.distress, entry.severity, entry.points)
        })?;
        set.cdv
            .into_iter()
            .try_fold(store, |store, (q, points)| store.with_cdv_curve(q, points))
    }
}

impl From<&CurveStore> for CurveSet {
    fn from(store: &CurveStore) -> Self {
        let deduct = DistressType::ALL
            .into_iter()
            .flat_map(move |distress| {
                let severities = if distress.has_severity() {
                    Severity::ALL.map(Some).to_vec()
                } else {
                    vec![None]
                };
                severities.into_iter().filter_map(move |severity| {
                    store
                        .deduct_curve(distress, severity)
                        .map(|curve| DeductCurveEntry {
                            distress,
                            severity,
                            points: curve.points().to_vec(),
                        })
                })
            })
            .collect();
        let cdv = store
            .cdv_curves()
            .map(|(q, curve)| (q, curve.points().to_vec()))
            .collect();
        Self { deduct, cdv }
    }
}

/// Errors that can occur when reading or writing curve data
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Error from parsing or emitting JSON
    #[error("invalid curve file: {0}")]
    Json(#[from] serde_json::Error),
    /// Error from validating the curves
    #[error(transparent)]
    Curve(#[from] PciError),
}

impl CurveStore {
    /// Reads and validates a JSON [`CurveSet`]
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let set: CurveSet = serde_json::from_reader(reader)?;
        Ok(Self::try_from(set)?)
    }

    /// Writes the store as a JSON [`CurveSet`]
    pub fn to_writer(&self, writer: impl Write) -> Result<(), LoadError> {
        serde_json::to_writer_pretty(writer, &CurveSet::from(self))?;
        Ok(())
    }
}
