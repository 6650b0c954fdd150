//! Consistency checks on sorting problems and their results.

use crate::domain::foundation::McdaError;
use crate::domain::model::{CatsAndProfs, MultiAssignments, SortingProblem};
use crate::domain::ranking::{Dominance, StrictDominance};

/// Preconditions shared by the sorting procedures.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Fails unless the coalitions cover exactly the problem criteria and the
    /// majority threshold is set and reachable.
    ///
    /// # Errors
    ///
    /// - `UnknownCriterion` / `IncompleteInput` on a criteria mismatch
    /// - `IncompleteInput` if λ is missing
    /// - `ThresholdOrderViolation` if λ exceeds the sum of weights
    pub fn assert_complete_coalitions(problem: &SortingProblem) -> Result<(), McdaError> {
        Self::assert_complete_weights(problem)?;
        let lambda = problem.coalitions.require_majority_threshold()?;
        let sum = problem.coalitions.sum_of_weights();
        if lambda > sum {
            return Err(McdaError::threshold_order(
                "majority_threshold",
                format!("majority threshold {} exceeds the sum of weights {}", lambda, sum),
            ));
        }
        Ok(())
    }

    /// Fails unless every problem criterion, and no other, has a weight.
    pub fn assert_complete_weights(problem: &SortingProblem) -> Result<(), McdaError> {
        problem.coalitions.weights.assert_complete(problem.criteria())
    }

    /// Fails unless every profile is evaluated on every problem criterion,
    /// and nothing else, within the criterion scales.
    pub fn assert_complete_profiles_evaluations(problem: &SortingProblem) -> Result<(), McdaError> {
        let profiles = problem.cats_and_profs.profiles();
        for profile in profiles {
            for crit in problem.criteria() {
                problem.profiles_evaluations.require(profile, crit)?;
            }
        }
        let expected = profiles.len() * problem.criteria().len();
        if problem.profiles_evaluations.value_count() != expected {
            return Err(McdaError::incomplete(format!(
                "expected {} profile evaluations, found {}",
                expected,
                problem.profiles_evaluations.value_count()
            )));
        }
        problem.profiles_data().assert_complete()
    }

    /// Fails unless the profiles strictly dominate each other in the declared
    /// order, worst first.
    pub fn assert_dominance(problem: &SortingProblem) -> Result<(), McdaError> {
        let declared = problem.cats_and_profs.profiles();
        if declared.is_empty() {
            return Ok(());
        }
        let evaluations = problem.profiles_evaluations.restrict_alternatives(declared);
        match Dominance::strict_dominance_order(&evaluations, &problem.scales.directions())? {
            StrictDominance::Order(order) if order == declared => Ok(()),
            StrictDominance::Order(order) => Err(McdaError::invalid_parameter(
                "profiles",
                format!(
                    "dominance orders the profiles as [{}]",
                    order.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
                ),
            )),
            StrictDominance::Ties | StrictDominance::Conflict => Err(McdaError::invalid_parameter(
                "profiles",
                "profiles do not form a strict dominance order",
            )),
        }
    }

    /// Fails unless every multi-assignment is a contiguous run of categories,
    /// worst first.
    pub fn assert_ordered_intervals(
        assignments: &MultiAssignments,
        categories: &CatsAndProfs,
    ) -> Result<(), McdaError> {
        for (alt, assigned) in assignments.iter() {
            let mut previous: Option<usize> = None;
            for category in assigned {
                let Some(index) = categories.index_of(category) else {
                    return Err(McdaError::incomplete(format!(
                        "'{}' is assigned to unknown category '{}'",
                        alt, category
                    )));
                };
                if let Some(prev) = previous {
                    if index != prev + 1 {
                        return Err(McdaError::invalid_parameter(
                            "assignments",
                            format!("categories of '{}' are not a contiguous interval", alt),
                        ));
                    }
                }
                previous = Some(index);
            }
            if previous.is_none() {
                return Err(McdaError::incomplete(format!("'{}' has no category", alt)));
            }
        }
        Ok(())
    }
}
