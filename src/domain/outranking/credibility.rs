//! Outranking credibility from concordance and discordances.

use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::foundation::{AlternativeId, CriterionId, McdaError, DEFAULT_CUT_TOLERANCE};
use crate::domain::model::RelationMatrix;

/// Outranking matrix plus, when cut, the smallest distance observed between
/// a credibility and the cut threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutrankingOutcome {
    pub matrix: RelationMatrix,
    pub smallest_separation: Option<f64>,
}

/// Combines concordance and per-criterion discordance into credibilities.
#[derive(Debug, Clone, Copy)]
pub struct Outranking {
    tolerance: f64,
}

impl Default for Outranking {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_CUT_TOLERANCE,
        }
    }
}

impl Outranking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how far below the cut a credibility may be and still give 1.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Fuzzy credibility of every ordered pair of `alternatives`.
    pub fn outranking(
        &self,
        alternatives: &[AlternativeId],
        criteria: &[CriterionId],
        concordance: &RelationMatrix,
        discordances: &BTreeMap<CriterionId, RelationMatrix>,
    ) -> Result<RelationMatrix, McdaError> {
        self.compute(alternatives, criteria, concordance, discordances, None)
            .map(|outcome| outcome.matrix)
    }

    /// Binary outranking: 1 iff credibility ≥ `cut` - tolerance.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `cut` is outside [0, 1]
    /// - `MissingRelationEntry` if a required cell is absent
    pub fn with_cut(
        &self,
        alternatives: &[AlternativeId],
        criteria: &[CriterionId],
        concordance: &RelationMatrix,
        discordances: &BTreeMap<CriterionId, RelationMatrix>,
        cut: f64,
    ) -> Result<OutrankingOutcome, McdaError> {
        if !(0.0..=1.0).contains(&cut) {
            return Err(McdaError::invalid_parameter(
                "cut_threshold",
                format!("must be within [0, 1], got {}", cut),
            ));
        }
        self.compute(alternatives, criteria, concordance, discordances, Some(cut))
    }

    /// Electre credibility of one pair.
    ///
    /// Starts from the concordance `c`; every discordance above `c` multiplies
    /// it by (1 - disc) / (1 - c), and a discordance of exactly 1 forces 0.
    pub fn credibility(concordance: f64, discordances: impl IntoIterator<Item = f64>) -> f64 {
        let complement = 1.0 - concordance;
        let mut outranking = concordance;
        for disc in discordances {
            if disc > concordance {
                outranking = outranking * (1.0 - disc) / complement;
            } else if disc == 1.0 {
                outranking = 0.0;
            }
        }
        outranking
    }

    fn compute(
        &self,
        alternatives: &[AlternativeId],
        criteria: &[CriterionId],
        concordance: &RelationMatrix,
        discordances: &BTreeMap<CriterionId, RelationMatrix>,
        cut: Option<f64>,
    ) -> Result<OutrankingOutcome, McdaError> {
        let mut matrices = Vec::with_capacity(criteria.len());
        for crit in criteria {
            let matrix = discordances.get(crit).ok_or_else(|| {
                McdaError::missing_entry(format!("discordance ({})", crit), "*", "*")
            })?;
            matrices.push((crit, matrix));
        }

        let mut matrix = RelationMatrix::new();
        let mut smallest = f64::INFINITY;
        for alt1 in alternatives {
            for alt2 in alternatives {
                let c = concordance.require("concordance", alt1, alt2)?;
                let mut discs = Vec::with_capacity(matrices.len());
                for (crit, disc_matrix) in &matrices {
                    discs.push(disc_matrix.require(&format!("discordance ({})", crit), alt1, alt2)?);
                }
                let credibility = Self::credibility(c, discs);
                let value = match cut {
                    None => credibility,
                    Some(threshold) => {
                        let diff = credibility - threshold;
                        smallest = smallest.min(diff.abs());
                        if diff >= -self.tolerance {
                            1.0
                        } else {
                            0.0
                        }
                    }
                };
                matrix.put(alt1, alt2, value);
            }
        }
        debug!(
            alternatives = alternatives.len(),
            cut = ?cut,
            "Computed outranking matrix"
        );
        Ok(OutrankingOutcome {
            matrix,
            smallest_separation: smallest.is_finite().then_some(smallest),
        })
    }
}
