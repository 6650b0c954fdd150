//! Dominance - Intersection of the per-criterion orders of alternatives.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::foundation::{AlternativeId, CriterionId, McdaError, PreferenceDirection};
use crate::domain::model::{Evaluations, Preorder};

/// Result of looking for a strict dominance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrictDominance {
    /// Alternatives from worst to best, each strictly dominating the previous.
    Order(Vec<AlternativeId>),
    /// The dominance relation is a preorder with ex aequo alternatives.
    Ties,
    /// Two criteria disagree strictly on some pair.
    Conflict,
}

impl StrictDominance {
    /// The order, if one exists.
    pub fn into_order(self) -> Option<Vec<AlternativeId>> {
        match self {
            StrictDominance::Order(order) => Some(order),
            StrictDominance::Ties | StrictDominance::Conflict => None,
        }
    }
}

/// Large dominance analysis.
pub struct Dominance;

impl Dominance {
    /// Dominance preorder of the evaluated alternatives.
    ///
    /// a dominates b iff a is at least as good as b on every criterion.
    ///
    /// # Algorithm
    ///
    /// Each criterion orders the alternatives by oriented value, ex aequo
    /// alternatives sharing a rank. These preorders are intersected one
    /// after the other.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the intersection is not a complete preorder, i.e. the
    /// criteria disagree strictly about some pair.
    ///
    /// # Errors
    ///
    /// `IncompleteInput` when evaluations are empty or incomplete, or a
    /// criterion has no direction.
    pub fn dominance(
        evaluations: &Evaluations,
        directions: &BTreeMap<CriterionId, PreferenceDirection>,
    ) -> Result<Option<Preorder>, McdaError> {
        if evaluations.is_empty() || evaluations.columns().is_empty() {
            return Err(McdaError::incomplete("evaluations are empty"));
        }
        evaluations.assert_complete()?;
        let mut oriented = Vec::with_capacity(evaluations.columns().len());
        for crit in evaluations.columns() {
            let direction = directions.get(crit).copied().ok_or_else(|| {
                McdaError::incomplete(format!("unknown preference direction for criterion '{}'", crit))
            })?;
            oriented.push((crit, direction));
        }

        let mut result: Option<Preorder> = None;
        for (crit, direction) in oriented {
            let preorder = Self::criterion_preorder(evaluations, crit, direction)?;
            result = match result {
                None => Some(preorder),
                Some(current) => match current.intersection(&preorder) {
                    Some(inter) => Some(inter),
                    None => {
                        debug!(criterion = %crit, "Dominance conflict");
                        return Ok(None);
                    }
                },
            };
        }
        Ok(result)
    }

    /// Alternatives from worst to best when dominance is a strict total order.
    pub fn strict_dominance_order(
        evaluations: &Evaluations,
        directions: &BTreeMap<CriterionId, PreferenceDirection>,
    ) -> Result<StrictDominance, McdaError> {
        let Some(preorder) = Self::dominance(evaluations, directions)? else {
            return Ok(StrictDominance::Conflict);
        };
        Ok(match preorder.total_order() {
            Some(order) => StrictDominance::Order(order),
            None => StrictDominance::Ties,
        })
    }

    /// Preorder induced by one criterion, best first.
    fn criterion_preorder(
        evaluations: &Evaluations,
        crit: &CriterionId,
        direction: PreferenceDirection,
    ) -> Result<Preorder, McdaError> {
        let mut valued = Vec::with_capacity(evaluations.rows().len());
        for alt in evaluations.rows() {
            valued.push((evaluations.require(alt, crit)?, alt));
        }
        valued.sort_by(|a, b| direction.compare(b.0, a.0));

        let mut preorder = Preorder::new();
        let mut current: Vec<AlternativeId> = Vec::new();
        let mut current_value: Option<f64> = None;
        for (value, alt) in valued {
            if let Some(previous) = current_value {
                if direction.compare(previous, value) != Ordering::Equal {
                    preorder.push_lowest(std::mem::take(&mut current));
                }
            }
            current.push(alt.clone());
            current_value = Some(value);
        }
        preorder.push_lowest(current);
        Ok(preorder)
    }
}
