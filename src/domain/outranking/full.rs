//! One-call outranking: concordance, discordance, credibility and cut.

use tracing::debug;

use super::{Concordance, Discordance, DiscordanceStyle, Outranking, OutrankingOutcome};
use crate::domain::foundation::{McdaError, Tolerances};
use crate::domain::model::{Coalitions, ProblemData, Thresholds};

/// Computes the outranking relation of a data set in one call.
///
/// When the coalitions carry a majority threshold λ, the result is cut at
/// λ / Σweights; otherwise it is the fuzzy credibility matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutrankingFull {
    style: DiscordanceStyle,
    tolerances: Tolerances,
}

impl OutrankingFull {
    pub fn new(style: DiscordanceStyle, tolerances: Tolerances) -> Self {
        Self { style, tolerances }
    }

    pub fn with_style(mut self, style: DiscordanceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Outranking over every ordered pair of the data alternatives.
    ///
    /// The smallest separation is the minimum of the cut separation and, with
    /// sharp vetoes, the veto separation.
    pub fn outranking(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
        coalitions: &Coalitions,
    ) -> Result<OutrankingOutcome, McdaError> {
        let concordance = Concordance::new()
            .with_tolerances(self.tolerances)
            .concordance(data, thresholds, &coalitions.weights)?;
        let discordance = Discordance::new(self.style).discordances(data, thresholds)?;

        let outranking = Outranking::new().with_tolerance(self.tolerances.cut);
        let mut outcome = match Self::cut_threshold(coalitions, self.tolerances.cut_rounding)? {
            Some(cut) => outranking.with_cut(
                data.alternatives(),
                data.criteria(),
                &concordance,
                &discordance.matrices,
                cut,
            )?,
            None => OutrankingOutcome {
                matrix: outranking.outranking(
                    data.alternatives(),
                    data.criteria(),
                    &concordance,
                    &discordance.matrices,
                )?,
                smallest_separation: None,
            },
        };

        outcome.smallest_separation = match (outcome.smallest_separation, discordance.smallest_separation) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        debug!(
            alternatives = data.alternatives().len(),
            smallest_separation = ?outcome.smallest_separation,
            "Computed full outranking"
        );
        Ok(outcome)
    }

    /// λ / Σweights, with values barely above 1 rounded down to 1.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the ratio exceeds 1 + `rounding`, or when a
    /// threshold is set but the weights sum to zero.
    pub fn cut_threshold(coalitions: &Coalitions, rounding: f64) -> Result<Option<f64>, McdaError> {
        let Some(lambda) = coalitions.majority_threshold else {
            return Ok(None);
        };
        let sum = coalitions.sum_of_weights();
        if sum <= 0.0 {
            return Err(McdaError::invalid_parameter(
                "weights",
                "sum of weights must be strictly positive",
            ));
        }
        let cut = lambda / sum;
        if cut > 1.0 + rounding {
            return Err(McdaError::invalid_parameter(
                "majority_threshold",
                format!("{} exceeds the sum of weights {}", lambda, sum),
            ));
        }
        Ok(Some(cut.min(1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AlternativeId, PreferenceDirection};
    use crate::domain::model::{Evaluations, Scales, Weights};

    fn alt(name: &str) -> AlternativeId {
        AlternativeId::new(name)
    }

    fn data() -> ProblemData {
        ProblemData::new(
            Evaluations::builder()
                .alternatives(vec!["a", "b"])
                .criteria(vec!["g1", "g2"])
                .row("a", &[10.0, 10.0])
                .row("b", &[12.0, 3.0])
                .build(),
            Scales::from_directions(vec![
                ("g1", PreferenceDirection::Maximize),
                ("g2", PreferenceDirection::Maximize),
            ]),
        )
    }

    fn coalitions(lambda: Option<f64>) -> Coalitions {
        let c = Coalitions::new(Weights::new().with("g1", 0.5).with("g2", 0.5));
        match lambda {
            Some(l) => c.with_majority_threshold(l),
            None => c,
        }
    }

    #[test]
    fn without_majority_threshold_result_is_fuzzy() {
        let outcome = OutrankingFull::default()
            .outranking(&data(), &Thresholds::new(), &coalitions(None))
            .unwrap();
        assert_eq!(outcome.matrix.get(&alt("a"), &alt("b")), Some(0.5));
        assert_eq!(outcome.smallest_separation, None);
    }

    #[test]
    fn majority_threshold_cuts_matrix() {
        let outcome = OutrankingFull::default()
            .outranking(&data(), &Thresholds::new(), &coalitions(Some(0.5)))
            .unwrap();
        assert_eq!(outcome.matrix.get(&alt("a"), &alt("b")), Some(1.0));
        assert_eq!(outcome.matrix.get(&alt("b"), &alt("a")), Some(1.0));
        assert!(outcome.matrix.is_binary(0.0));
    }

    #[test]
    fn sharp_veto_blocks_and_reports_separation() {
        let thresholds = Thresholds::new().with_veto("g2", 6.0);
        let outcome = OutrankingFull::default()
            .with_style(DiscordanceStyle::SharpVeto)
            .outranking(&data(), &thresholds, &coalitions(Some(0.5)))
            .unwrap();
        // a leads b by 7 on g2, above the veto of 6.
        assert_eq!(outcome.matrix.get(&alt("b"), &alt("a")), Some(0.0));
        assert_eq!(outcome.matrix.get(&alt("a"), &alt("b")), Some(1.0));
        // Cut separations are 0 here, so they dominate the veto separation of 1.
        assert_eq!(outcome.smallest_separation, Some(0.0));
    }

    #[test]
    fn cut_threshold_rounds_tiny_overshoot() {
        let c = coalitions(Some(1.000_000_5));
        assert_eq!(OutrankingFull::cut_threshold(&c, 1e-6).unwrap(), Some(1.0));
    }

    #[test]
    fn cut_threshold_rejects_large_overshoot() {
        let c = coalitions(Some(1.2));
        assert!(matches!(
            OutrankingFull::cut_threshold(&c, 1e-6),
            Err(McdaError::InvalidParameter { .. })
        ));
    }
}
