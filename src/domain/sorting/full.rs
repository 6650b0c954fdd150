//! Sorting Engine - Full Electre Tri pipeline from a sorting problem.

use serde::Serialize;
use tracing::info;

use super::{ConsistencyChecker, SortingAssigner, SortingMode};
use crate::domain::foundation::{McdaError, Tolerances};
use crate::domain::model::{MultiAssignments, SortingProblem};
use crate::domain::outranking::{DiscordanceStyle, OutrankingFull};

/// Assignments together with the diagnostic of the outranking they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortingOutcome {
    pub assignments: MultiAssignments,
    /// Smallest distance between a credibility or veto value and its cut.
    pub smallest_separation: Option<f64>,
}

/// Sorts the alternatives of a problem into its categories.
#[derive(Debug, Clone, Copy)]
pub struct SortingEngine {
    style: DiscordanceStyle,
    tolerances: Tolerances,
}

impl Default for SortingEngine {
    fn default() -> Self {
        Self {
            style: DiscordanceStyle::SharpVeto,
            tolerances: Tolerances::default(),
        }
    }
}

impl SortingEngine {
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

    /// Runs the pipeline.
    ///
    /// # Algorithm
    ///
    /// 1. Check the coalitions against the problem criteria
    /// 2. Compute the cut outranking over alternatives and profiles together
    /// 3. Assign every alternative in the requested mode
    pub fn sort(&self, problem: &SortingProblem, mode: SortingMode) -> Result<SortingOutcome, McdaError> {
        ConsistencyChecker::assert_complete_coalitions(problem)?;
        problem.cats_and_profs.assert_complete()?;
        ConsistencyChecker::assert_complete_profiles_evaluations(problem)?;

        let data = problem.all_data();
        let outranking = OutrankingFull::new(self.style, self.tolerances).outranking(
            &data,
            &problem.thresholds,
            &problem.coalitions,
        )?;
        let assignments = SortingAssigner::new()
            .with_binary_tolerance(self.tolerances.binary)
            .assign(
                mode,
                problem.alternatives(),
                &outranking.matrix,
                &problem.cats_and_profs,
            )?;

        info!(
            alternatives = assignments.len(),
            mode = ?mode,
            smallest_separation = ?outranking.smallest_separation,
            "Sorted alternatives"
        );
        Ok(SortingOutcome {
            assignments,
            smallest_separation: outranking.smallest_separation,
        })
    }

    /// Pessimistic and optimistic assignments as intervals.
    pub fn both(&self, problem: &SortingProblem) -> Result<SortingOutcome, McdaError> {
        self.sort(problem, SortingMode::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AlternativeId, CategoryId, PreferenceDirection};
    use crate::domain::model::{CatsAndProfs, Coalitions, Evaluations, Scales, Thresholds, Weights};

    fn problem() -> SortingProblem {
        SortingProblem {
            alternatives_evaluations: Evaluations::builder()
                .alternatives(vec!["low", "mid", "high"])
                .criteria(vec!["g1", "g2"])
                .row("low", &[2.0, 3.0])
                .row("mid", &[12.0, 15.0])
                .row("high", &[25.0, 30.0])
                .build(),
            profiles_evaluations: Evaluations::builder()
                .alternatives(vec!["p1", "p2"])
                .criteria(vec!["g1", "g2"])
                .row("p1", &[10.0, 10.0])
                .row("p2", &[20.0, 20.0])
                .build(),
            scales: Scales::from_directions(vec![
                ("g1", PreferenceDirection::Maximize),
                ("g2", PreferenceDirection::Maximize),
            ]),
            thresholds: Thresholds::new(),
            coalitions: Coalitions::new(Weights::new().with("g1", 0.5).with("g2", 0.5))
                .with_majority_threshold(0.75),
            cats_and_profs: CatsAndProfs::builder()
                .category("bad")
                .profile("p1")
                .category("medium")
                .profile("p2")
                .category("good")
                .build(),
        }
    }

    fn categories(outcome: &SortingOutcome, alt: &str) -> Vec<CategoryId> {
        outcome
            .assignments
            .categories(&AlternativeId::new(alt))
            .unwrap_or_default()
            .to_vec()
    }

    #[test]
    fn clear_cut_problem_is_crisp() {
        let outcome = SortingEngine::default().both(&problem()).unwrap();
        assert!(outcome.assignments.is_crisp());
        assert_eq!(categories(&outcome, "low"), vec![CategoryId::new("bad")]);
        assert_eq!(categories(&outcome, "mid"), vec![CategoryId::new("medium")]);
        assert_eq!(categories(&outcome, "high"), vec![CategoryId::new("good")]);
    }

    #[test]
    fn pessimistic_mode_matches_both_on_crisp_problem() {
        let outcome = SortingEngine::default()
            .sort(&problem(), SortingMode::Pessimistic)
            .unwrap();
        assert_eq!(categories(&outcome, "mid"), vec![CategoryId::new("medium")]);
    }

    #[test]
    fn unreachable_majority_threshold_fails_before_outranking() {
        let mut p = problem();
        p.coalitions.majority_threshold = Some(1.5);
        let err = SortingEngine::default().both(&p).unwrap_err();
        assert!(matches!(err, McdaError::ThresholdOrderViolation { .. }));
    }

    #[test]
    fn split_evidence_widens_the_interval() {
        let mut p = problem();
        // Good on g1, bad on g2: half the weight on each side of both profiles.
        p.alternatives_evaluations = Evaluations::builder()
            .alternatives(vec!["split"])
            .criteria(vec!["g1", "g2"])
            .row("split", &[25.0, 3.0])
            .build();
        let outcome = SortingEngine::default().both(&p).unwrap();
        assert_eq!(
            categories(&outcome, "split"),
            vec![CategoryId::new("bad"), CategoryId::new("medium"), CategoryId::new("good")]
        );
    }
}
