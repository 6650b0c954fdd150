//! Promethee profiles: per-criterion net flows.

use tracing::debug;

use crate::domain::foundation::McdaError;
use crate::domain::model::{Evaluations, ProblemData, Thresholds};
use crate::domain::outranking::Concordance;

/// Computes the Promethee profile of every alternative.
pub struct PrometheeProfiles;

impl PrometheeProfiles {
    /// For each alternative a and criterion g, the mean over the other
    /// alternatives x of P_g(a, x) - P_g(x, a).
    ///
    /// A single alternative gets profiles of 0.
    pub fn compute(data: &ProblemData, thresholds: &Thresholds) -> Result<Evaluations, McdaError> {
        thresholds.assert_known_criteria(data.criteria())?;
        thresholds.assert_preference_above_indifference(data.criteria())?;
        data.assert_complete()?;

        let others = data.alternatives().len().saturating_sub(1);
        let mut profiles = Evaluations::builder()
            .alternatives(data.alternatives().to_vec())
            .criteria(data.criteria().to_vec())
            .build();
        for a in data.alternatives() {
            for crit in data.criteria() {
                let direction = data.scales.require_direction(crit)?;
                let (p, q) = (thresholds.p(crit), thresholds.q(crit));
                let eval_a = data.evaluations.require(a, crit)?;
                let mut sum = 0.0;
                for x in data.alternatives() {
                    let eval_x = data.evaluations.require(x, crit)?;
                    let pax = Concordance::preference_pairwise(eval_a, eval_x, direction, p, q)?;
                    let pxa = Concordance::preference_pairwise(eval_x, eval_a, direction, p, q)?;
                    sum += pax - pxa;
                }
                let value = if others == 0 { 0.0 } else { sum / others as f64 };
                profiles.put(a.clone(), crit.clone(), value);
            }
        }
        debug!(alternatives = data.alternatives().len(), "Computed Promethee profiles");
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AlternativeId, CriterionId, PreferenceDirection};
    use crate::domain::model::Scales;

    fn data() -> ProblemData {
        ProblemData::new(
            Evaluations::builder()
                .alternatives(vec!["a", "b", "c"])
                .criteria(vec!["g1"])
                .row("a", &[10.0])
                .row("b", &[5.0])
                .row("c", &[0.0])
                .build(),
            Scales::from_directions(vec![("g1", PreferenceDirection::Maximize)]),
        )
    }

    #[test]
    fn best_alternative_has_highest_profile() {
        let profiles = PrometheeProfiles::compute(&data(), &Thresholds::new()).unwrap();
        let g1 = CriterionId::new("g1");
        assert_eq!(profiles.get(&AlternativeId::new("a"), &g1), Some(1.0));
        assert_eq!(profiles.get(&AlternativeId::new("b"), &g1), Some(0.0));
        assert_eq!(profiles.get(&AlternativeId::new("c"), &g1), Some(-1.0));
    }

    #[test]
    fn thresholds_soften_profiles() {
        let thresholds = Thresholds::new().with_preference("g1", 10.0);
        let profiles = PrometheeProfiles::compute(&data(), &thresholds).unwrap();
        // P(a, b) = 0.5, P(a, c) = 1.
        let value = profiles.get(&AlternativeId::new("a"), &CriterionId::new("g1")).unwrap();
        assert!((value - 0.75).abs() < 1e-12);
    }

    #[test]
    fn profiles_are_complete() {
        let profiles = PrometheeProfiles::compute(&data(), &Thresholds::new()).unwrap();
        assert!(profiles.is_complete());
    }
}
