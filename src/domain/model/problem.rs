//! Problem bundles handed to the services.

use serde::{Deserialize, Serialize};

use super::{CatsAndProfs, Coalitions, Evaluations, Scales, Thresholds};
use crate::domain::foundation::{AlternativeId, CriterionId, McdaError};

/// Evaluations together with the scales of their criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemData {
    pub evaluations: Evaluations,
    pub scales: Scales,
}

impl ProblemData {
    pub fn new(evaluations: Evaluations, scales: Scales) -> Self {
        Self { evaluations, scales }
    }

    pub fn alternatives(&self) -> &[AlternativeId] {
        self.evaluations.rows()
    }

    pub fn criteria(&self) -> &[CriterionId] {
        self.evaluations.columns()
    }

    /// Fails unless evaluations are complete, every criterion has a direction
    /// and every evaluation lies on its criterion scale.
    pub fn assert_complete(&self) -> Result<(), McdaError> {
        self.evaluations.assert_complete()?;
        self.scales.assert_complete_directions(self.criteria())?;
        self.scales.assert_within_bounds(&self.evaluations)
    }
}

/// Everything needed to sort alternatives into categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortingProblem {
    pub alternatives_evaluations: Evaluations,
    pub profiles_evaluations: Evaluations,
    pub scales: Scales,
    #[serde(default)]
    pub thresholds: Thresholds,
    pub coalitions: Coalitions,
    pub cats_and_profs: CatsAndProfs,
}

impl SortingProblem {
    /// Alternatives to sort.
    pub fn alternatives(&self) -> &[AlternativeId] {
        self.alternatives_evaluations.rows()
    }

    /// Criteria of the alternatives.
    pub fn criteria(&self) -> &[CriterionId] {
        self.alternatives_evaluations.columns()
    }

    /// Alternatives and profiles in one data set, alternatives first.
    pub fn all_data(&self) -> ProblemData {
        ProblemData::new(
            self.alternatives_evaluations.merge(&self.profiles_evaluations),
            self.scales.clone(),
        )
    }

    /// Profiles only, as a data set.
    pub fn profiles_data(&self) -> ProblemData {
        ProblemData::new(self.profiles_evaluations.clone(), self.scales.clone())
    }
}
