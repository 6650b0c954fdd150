//! Per-criterion discordance (veto strength).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::foundation::{CriterionId, McdaError, PreferenceDirection};
use crate::domain::model::{ProblemData, RelationMatrix, Thresholds};

/// Shape of the discordance index between the preference and veto thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscordanceStyle {
    /// 0 up to p, 1 beyond v, linear between.
    #[default]
    Linear,
    /// Step function at v.
    SharpVeto,
}

/// Discordance matrices plus, for sharp vetoes, the smallest distance
/// observed between a performance gap and its veto threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscordanceOutcome {
    pub matrices: BTreeMap<CriterionId, RelationMatrix>,
    pub smallest_separation: Option<f64>,
}

/// Computes one discordance matrix per criterion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discordance {
    style: DiscordanceStyle,
}

impl Discordance {
    pub fn new(style: DiscordanceStyle) -> Self {
        Self { style }
    }

    pub fn linear() -> Self {
        Self::new(DiscordanceStyle::Linear)
    }

    pub fn sharp() -> Self {
        Self::new(DiscordanceStyle::SharpVeto)
    }

    pub fn style(&self) -> DiscordanceStyle {
        self.style
    }

    /// Discordance of every ordered pair of alternatives, per criterion.
    ///
    /// Criteria without a veto threshold get an all-zero matrix.
    pub fn discordances(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
    ) -> Result<DiscordanceOutcome, McdaError> {
        data.assert_complete()?;
        thresholds.assert_known_criteria(data.criteria())?;
        thresholds.assert_veto_above_preference(data.criteria())?;

        let mut outcome = DiscordanceOutcome::default();
        let mut smallest = f64::INFINITY;
        for crit in data.criteria() {
            let direction = data.scales.require_direction(crit)?;
            let veto = thresholds.veto_threshold(crit);
            let p = thresholds.p(crit);
            let mut matrix = RelationMatrix::new();
            for alt1 in data.alternatives() {
                for alt2 in data.alternatives() {
                    let eval1 = data.evaluations.require(alt1, crit)?;
                    let eval2 = data.evaluations.require(alt2, crit)?;
                    let value = match (self.style, veto) {
                        (_, None) => 0.0,
                        (DiscordanceStyle::Linear, Some(_)) => {
                            Self::discordance_pairwise(eval1, eval2, direction, p, veto)
                                .map_err(|err| relabel(err, crit))?
                        }
                        (DiscordanceStyle::SharpVeto, Some(v)) => {
                            let (vetoes, separation) =
                                Self::sharp_veto_pairwise(eval1, eval2, direction, v);
                            smallest = smallest.min(separation);
                            if vetoes {
                                1.0
                            } else {
                                0.0
                            }
                        }
                    };
                    matrix.put(alt1, alt2, value);
                }
            }
            debug!(criterion = %crit, style = ?self.style, "Computed discordance matrix");
            outcome.matrices.insert(crit.clone(), matrix);
        }
        if smallest.is_finite() {
            outcome.smallest_separation = Some(smallest);
        }
        Ok(outcome)
    }

    /// Linear discordance of `eval1` against `eval2`.
    ///
    /// With d = eval2 - eval1 oriented by the direction, the result is 0 while
    /// d ≤ p, 1 once d > v, and linear between. No veto threshold means 0.
    pub fn discordance_pairwise(
        eval1: f64,
        eval2: f64,
        direction: PreferenceDirection,
        p: f64,
        veto: Option<f64>,
    ) -> Result<f64, McdaError> {
        let Some(v) = veto else {
            return Ok(0.0);
        };
        if v < p {
            return Err(McdaError::threshold_order(
                "(pairwise)",
                format!("veto threshold {} is smaller than preference threshold {}", v, p),
            ));
        }
        let diff = direction.orient(eval2 - eval1);
        let disc = if diff <= p {
            0.0
        } else if diff > v {
            1.0
        } else {
            (diff - p) / (v - p)
        };
        Ok(disc)
    }

    /// Sharp veto of `eval2` against `eval1`: true iff the oriented gap exceeds `veto`.
    ///
    /// Also returns |gap - veto|, the distance to the flipping point.
    pub fn sharp_veto_pairwise(
        eval1: f64,
        eval2: f64,
        direction: PreferenceDirection,
        veto: f64,
    ) -> (bool, f64) {
        let diff = direction.orient(eval2 - eval1);
        (diff > veto, (diff - veto).abs())
    }
}

fn relabel(err: McdaError, crit: &CriterionId) -> McdaError {
    match err {
        McdaError::ThresholdOrderViolation { reason, .. } => McdaError::threshold_order(crit, reason),
        other => other,
    }
}
