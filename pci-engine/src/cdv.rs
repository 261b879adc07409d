use crate::{CurveStore, PciError};
use tracing::{Level, event};

/// Deduct values at or below this are insignificant when counting q
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 2.0;

/// The record of a single pass of the CDV reduction
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct CdvIteration {
    /// The number of deduct values above the significance threshold
    pub q: usize,
    /// The total of every deduct value in the working set
    pub tdv: f64,
    /// The corrected deduct value for this pass (zero when q is zero)
    pub cdv: f64,
}

/// Reduces the deduct values of a sample unit to its maximum corrected deduct value.
///
/// Each pass counts the significant deduct values (q), sums all values (TDV) and
/// reads the q-curve at TDV. Until q reaches one, the smallest significant value
/// is then demoted to the threshold and the pass repeats. Each demotion lowers q
/// by exactly one, so there are at most as many passes as deduct values.
#[derive(Clone, Copy, Debug)]
pub struct CdvIterator<'s> {
    store: &'s CurveStore,
    threshold: f64,
}

impl<'s> CdvIterator<'s> {
    /// Creates an iterator over the given curves with the standard threshold of 2.0
    pub fn new(store: &'s CurveStore) -> Self {
        Self {
            store,
            threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
        }
    }

    /// Replaces the significance threshold (also the floor that values are demoted to).
    ///
    /// Fails with [`PciError::Threshold`] unless the threshold is finite and within [0, 100).
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, PciError> {
        if !is_valid_threshold(threshold) {
            return Err(PciError::Threshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Runs the reduction, returning every pass in order.
    ///
    /// The result is never empty: if no value exceeds the threshold (including
    /// the case of no values at all), a single pass with q = 0 and a CDV of 0 is
    /// recorded.
    pub fn iterations(&self, deduct_values: &[f64]) -> Result<Vec<CdvIteration>, PciError> {
        let threshold = self.threshold;
        let mut working = deduct_values.to_vec();
        let mut iterations = Vec::with_capacity(working.len().max(1));

        loop {
            let q = working.iter().filter(|&&dv| dv > threshold).count();
            let tdv = working.iter().sum::<f64>();

            if q == 0 {
                event!(Level::DEBUG, tdv, "no significant deduct values");
                iterations.push(CdvIteration { q, tdv, cdv: 0.0 });
                break;
            }

            let cdv = self.store.cdv(q, tdv)?;
            event!(Level::DEBUG, q, tdv, cdv, "cdv iteration");
            iterations.push(CdvIteration { q, tdv, cdv });

            if q == 1 {
                break;
            }

            // Demote exactly one of the smallest significant values
            let smallest = working
                .iter()
                .enumerate()
                .filter(|(_, dv)| **dv > threshold)
                .min_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(idx, _)| idx);
            match smallest {
                Some(idx) => working[idx] = threshold,
                None => break,
            }
        }

        Ok(iterations)
    }

    /// Runs the reduction and returns the largest CDV over all passes.
    ///
    /// An empty input, or one where no value exceeds the threshold, yields 0.
    pub fn max_cdv(&self, deduct_values: &[f64]) -> Result<f64, PciError> {
        Ok(max_of(&self.iterations(deduct_values)?))
    }
}

// Any threshold of 100 or more, or NaN, would leave every deduct value insignificant
pub(crate) fn is_valid_threshold(threshold: f64) -> bool {
    threshold.is_finite() && (0.0..100.0).contains(&threshold)
}

pub(crate) fn max_of(iterations: &[CdvIteration]) -> f64 {
    iterations
        .iter()
        .map(|iteration| iteration.cdv)
        .fold(0.0, f64::max)
}
