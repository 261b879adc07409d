use crate::{PciError, interpolate};
use pci_core::models::{Curve, DistressType, Point, Severity};
use std::{collections::BTreeMap, fmt};
use tracing::{Level, event};

/// Deduct and corrected deduct values live in [0, 100]
const VALUE_RANGE: (f64, f64) = (0.0, 100.0);

/// Each distress owns one table slot per severity; distresses without
/// severity levels use only the first.
const SEVERITY_SLOTS: usize = Severity::ALL.len();
const DEDUCT_SLOTS: usize = DistressType::ALL.len() * SEVERITY_SLOTS;

/// Identifies a curve within a [`CurveStore`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveKey {
    /// A deduct-value curve; `severity` is `None` for distresses without severity levels
    Deduct {
        /// The distress the curve applies to
        distress: DistressType,
        /// The severity the curve applies to
        severity: Option<Severity>,
    },
    /// A corrected-deduct-value curve for `q` significant deduct values
    Cdv {
        /// The number of deduct values above the significance threshold
        q: usize,
    },
}

impl CurveKey {
    /// The key of a deduct curve, ignoring severity for distresses without severity levels
    pub fn deduct(distress: DistressType, severity: Option<Severity>) -> Self {
        Self::Deduct {
            distress,
            severity: severity.filter(|_| distress.has_severity()),
        }
    }
}

impl fmt::Display for CurveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deduct {
                distress,
                severity: Some(severity),
            } => write!(f, "deduct curve {} ({distress}, severity {severity})", distress.id()),
            Self::Deduct {
                distress,
                severity: None,
            } => write!(f, "deduct curve {} ({distress})", distress.id()),
            Self::Cdv { q } => write!(f, "CDV curve q={q}"),
        }
    }
}

/// Immutable reference data for PCI calculations
///
/// Deduct curves are held in a fixed table indexed by the closed distress catalog
/// and severity, and CDV curves are keyed by q. Curves are validated before they
/// enter the store. Once loaded, a store is only read, so it may be shared across
/// threads (e.g. behind an `Arc`) by concurrent calculations.
#[derive(Clone, Debug)]
pub struct CurveStore {
    deduct: [Option<Curve>; DEDUCT_SLOTS],
    cdv: BTreeMap<usize, Curve>,
}

impl Default for CurveStore {
    fn default() -> Self {
        Self {
            deduct: std::array::from_fn(|_| None),
            cdv: BTreeMap::new(),
        }
    }
}

// The table slot of a deduct curve, if the severity suits the distress
fn deduct_slot(distress: DistressType, severity: Option<Severity>) -> Option<usize> {
    let base = (distress.id() as usize - 1) * SEVERITY_SLOTS;
    if distress.has_severity() {
        severity.map(|severity| base + severity.index())
    } else {
        Some(base)
    }
}

impl CurveStore {
    /// Creates a store without any curves
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a raw coordinate table and registers it as a deduct curve.
    ///
    /// Fails fast with [`PciError::CurveData`], naming the key, if the points are malformed.
    pub fn with_deduct_curve(
        mut self,
        distress: DistressType,
        severity: Option<Severity>,
        points: Vec<Point>,
    ) -> Result<Self, PciError> {
        let curve = Curve::new(points).map_err(|source| PciError::CurveData {
            key: CurveKey::deduct(distress, severity),
            source,
        })?;
        self.insert_deduct_curve(distress, severity, curve)?;
        Ok(self)
    }

    /// Validates a raw coordinate table and registers it as the CDV curve for `q`.
    ///
    /// Fails fast with [`PciError::CurveData`], naming the key, if the points are malformed.
    pub fn with_cdv_curve(mut self, q: usize, points: Vec<Point>) -> Result<Self, PciError> {
        let curve = Curve::new(points).map_err(|source| PciError::CurveData {
            key: CurveKey::Cdv { q },
            source,
        })?;
        self.insert_cdv_curve(q, curve)?;
        Ok(self)
    }

    /// Registers a deduct curve, returning the curve it replaces.
    ///
    /// The severity is ignored for distresses without severity levels, and is
    /// required for all others.
    pub fn insert_deduct_curve(
        &mut self,
        distress: DistressType,
        severity: Option<Severity>,
        curve: Curve,
    ) -> Result<Option<Curve>, PciError> {
        let key = CurveKey::deduct(distress, severity);
        let slot = deduct_slot(distress, severity).ok_or(PciError::InvalidCurveKey(key))?;
        Ok(self.deduct[slot].replace(curve))
    }

    /// Registers the CDV curve for `q >= 1`, returning the curve it replaces
    pub fn insert_cdv_curve(&mut self, q: usize, curve: Curve) -> Result<Option<Curve>, PciError> {
        if q == 0 {
            return Err(PciError::InvalidCurveKey(CurveKey::Cdv { q }));
        }
        Ok(self.cdv.insert(q, curve))
    }

    /// The deduct curve for a distress and severity, if registered
    pub fn deduct_curve(&self, distress: DistressType, severity: Option<Severity>) -> Option<&Curve> {
        deduct_slot(distress, severity).and_then(|slot| self.deduct[slot].as_ref())
    }

    /// The largest q with a registered CDV curve
    pub fn max_q(&self) -> Option<usize> {
        self.cdv.keys().next_back().copied()
    }

    /// The registered CDV curves, in increasing q
    pub fn cdv_curves(&self) -> impl Iterator<Item = (usize, &Curve)> {
        self.cdv.iter().map(|(&q, curve)| (q, curve))
    }

    /// The CDV curve used for `q` significant deduct values.
    ///
    /// Any q beyond the largest registered q uses that largest curve, following
    /// the ASTM convention that the last curve covers "q or more".
    pub fn cdv_curve(&self, q: usize) -> Option<&Curve> {
        if q == 0 {
            return None;
        }
        if let Some(curve) = self.cdv.get(&q) {
            return Some(curve);
        }
        let (&max_q, curve) = self.cdv.last_key_value()?;
        if q > max_q {
            event!(Level::TRACE, q, max_q, "using the largest CDV curve");
            Some(curve)
        } else {
            None
        }
    }

    /// Interpolates the deduct value of a distress at the given density.
    ///
    /// The result is clamped into [0, 100].
    pub fn deduct_value(
        &self,
        distress: DistressType,
        severity: Option<Severity>,
        density: f64,
    ) -> Result<f64, PciError> {
        let key = CurveKey::deduct(distress, severity);
        let curve = self
            .deduct_curve(distress, severity)
            .ok_or(PciError::MissingCurve(key))?;
        lookup(key, curve, density)
    }

    /// Interpolates the corrected deduct value for `q` significant deducts summing to `tdv`.
    ///
    /// The result is clamped into [0, 100].
    pub fn cdv(&self, q: usize, tdv: f64) -> Result<f64, PciError> {
        let key = CurveKey::Cdv { q };
        let curve = self.cdv_curve(q).ok_or(PciError::MissingCurve(key))?;
        lookup(key, curve, tdv)
    }
}

fn lookup(key: CurveKey, curve: &Curve, x: f64) -> Result<f64, PciError> {
    let y = interpolate(curve.points(), x).map_err(|source| PciError::CurveData { key, source })?;
    Ok(y.clamp(VALUE_RANGE.0, VALUE_RANGE.1))
}
