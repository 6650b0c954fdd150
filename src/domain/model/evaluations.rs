//! Evaluation matrix - performance of alternatives on criteria.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{AlternativeId, CriterionId, McdaError};

/// The evaluation matrix mapping alternatives x criteria to real numbers.
///
/// The matrix may be sparse while it is being built, but every algorithm
/// requires the cells it touches to be present: a missing value is a
/// precondition violation, never a zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EvaluationsData")]
pub struct Evaluations {
    /// Ordered list of alternative IDs (rows).
    alternatives: Vec<AlternativeId>,
    /// Ordered list of criterion IDs (columns).
    criteria: Vec<CriterionId>,
    /// Values keyed by alternative then criterion.
    values: BTreeMap<AlternativeId, BTreeMap<CriterionId, f64>>,
    #[serde(skip)]
    known_alternatives: BTreeSet<AlternativeId>,
    #[serde(skip)]
    known_criteria: BTreeSet<CriterionId>,
}

/// Wire shape of [`Evaluations`].
#[derive(Deserialize)]
struct EvaluationsData {
    alternatives: Vec<AlternativeId>,
    criteria: Vec<CriterionId>,
    #[serde(default)]
    values: BTreeMap<AlternativeId, BTreeMap<CriterionId, f64>>,
}

impl From<EvaluationsData> for Evaluations {
    fn from(data: EvaluationsData) -> Self {
        Self::from_parts(data.alternatives, data.criteria, data.values)
    }
}

impl Evaluations {
    /// Creates an empty evaluation matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing an evaluation matrix.
    pub fn builder() -> EvaluationsBuilder {
        EvaluationsBuilder::new()
    }

    fn from_parts(
        alternatives: Vec<AlternativeId>,
        criteria: Vec<CriterionId>,
        values: BTreeMap<AlternativeId, BTreeMap<CriterionId, f64>>,
    ) -> Self {
        let mut evaluations = Self {
            values,
            ..Self::default()
        };
        for alt in alternatives {
            evaluations.register_alternative(alt);
        }
        for crit in criteria {
            evaluations.register_criterion(crit);
        }
        evaluations
    }

    fn register_alternative(&mut self, alternative: AlternativeId) {
        if self.known_alternatives.insert(alternative.clone()) {
            self.alternatives.push(alternative);
        }
    }

    fn register_criterion(&mut self, criterion: CriterionId) {
        if self.known_criteria.insert(criterion.clone()) {
            self.criteria.push(criterion);
        }
    }

    /// Gets the evaluation of an alternative on a criterion.
    pub fn get(&self, alternative: &AlternativeId, criterion: &CriterionId) -> Option<f64> {
        self.values
            .get(alternative)
            .and_then(|row| row.get(criterion))
            .copied()
    }

    /// Gets the evaluation or fails with `IncompleteInput`.
    pub fn require(
        &self,
        alternative: &AlternativeId,
        criterion: &CriterionId,
    ) -> Result<f64, McdaError> {
        self.get(alternative, criterion).ok_or_else(|| {
            McdaError::incomplete(format!(
                "no evaluation for alternative '{}' on criterion '{}'",
                alternative, criterion
            ))
        })
    }

    /// Sets a value, registering the alternative and criterion if new.
    pub fn put(&mut self, alternative: AlternativeId, criterion: CriterionId, value: f64) {
        self.register_alternative(alternative.clone());
        self.register_criterion(criterion.clone());
        self.values
            .entry(alternative)
            .or_default()
            .insert(criterion, value);
    }

    /// Drops every value of an alternative, keeping it as a row.
    pub fn clear_alternative(&mut self, alternative: &AlternativeId) {
        self.values.remove(alternative);
    }

    /// Ordered alternatives (rows).
    pub fn rows(&self) -> &[AlternativeId] {
        &self.alternatives
    }

    /// Ordered criteria (columns).
    pub fn columns(&self) -> &[CriterionId] {
        &self.criteria
    }

    /// Returns true if the matrix has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Number of values actually present.
    pub fn value_count(&self) -> usize {
        self.values.values().map(|row| row.len()).sum()
    }

    /// Returns true if every row x column cell holds a finite value.
    pub fn is_complete(&self) -> bool {
        self.alternatives.iter().all(|alt| {
            self.criteria
                .iter()
                .all(|crit| self.get(alt, crit).map(f64::is_finite).unwrap_or(false))
        })
    }

    /// Fails with `IncompleteInput` unless the matrix is complete.
    pub fn assert_complete(&self) -> Result<(), McdaError> {
        for alt in &self.alternatives {
            for crit in &self.criteria {
                let value = self.require(alt, crit)?;
                if !value.is_finite() {
                    return Err(McdaError::incomplete(format!(
                        "evaluation of '{}' on '{}' is not finite",
                        alt, crit
                    )));
                }
            }
        }
        Ok(())
    }

    /// Returns a new matrix holding the rows of both matrices.
    ///
    /// Used to put alternatives and profiles in one matrix. Rows of `other`
    /// override rows of `self` with the same id.
    pub fn merge(&self, other: &Evaluations) -> Evaluations {
        let mut merged = self.clone();
        for crit in &other.criteria {
            merged.register_criterion(crit.clone());
        }
        for alt in &other.alternatives {
            merged.register_alternative(alt.clone());
            if let Some(row) = other.values.get(alt) {
                let target = merged.values.entry(alt.clone()).or_default();
                for (crit, value) in row {
                    target.insert(crit.clone(), *value);
                }
            }
        }
        merged
    }

    /// Returns a copy restricted to the given rows, in the given order.
    pub fn restrict_alternatives(&self, alternatives: &[AlternativeId]) -> Evaluations {
        let alternatives: Vec<AlternativeId> = alternatives
            .iter()
            .filter(|alt| self.known_alternatives.contains(*alt))
            .cloned()
            .collect();
        let values = alternatives
            .iter()
            .filter_map(|alt| self.values.get(alt).map(|row| (alt.clone(), row.clone())))
            .collect();
        Self::from_parts(alternatives, self.criteria.clone(), values)
    }

    /// Returns a copy restricted to the given columns, in the given order.
    pub fn restrict_criteria(&self, criteria: &[CriterionId]) -> Evaluations {
        let criteria: Vec<CriterionId> = criteria
            .iter()
            .filter(|crit| self.known_criteria.contains(*crit))
            .cloned()
            .collect();
        let kept_criteria: BTreeSet<&CriterionId> = criteria.iter().collect();
        let values = self
            .values
            .iter()
            .map(|(alt, row)| {
                let kept = row
                    .iter()
                    .filter(|(crit, _)| kept_criteria.contains(crit))
                    .map(|(crit, v)| (crit.clone(), *v))
                    .collect();
                (alt.clone(), kept)
            })
            .collect();
        Self::from_parts(self.alternatives.clone(), criteria, values)
    }
}

/// Builder for constructing Evaluations instances.
#[derive(Debug, Default)]
pub struct EvaluationsBuilder {
    alternatives: Vec<AlternativeId>,
    criteria: Vec<CriterionId>,
    values: BTreeMap<AlternativeId, BTreeMap<CriterionId, f64>>,
}

impl EvaluationsBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alternatives.
    pub fn alternatives(mut self, ids: Vec<impl Into<AlternativeId>>) -> Self {
        self.alternatives = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the criteria.
    pub fn criteria(mut self, ids: Vec<impl Into<CriterionId>>) -> Self {
        self.criteria = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a value.
    pub fn value(
        mut self,
        alternative: impl Into<AlternativeId>,
        criterion: impl Into<CriterionId>,
        value: f64,
    ) -> Self {
        self.values
            .entry(alternative.into())
            .or_default()
            .insert(criterion.into(), value);
        self
    }

    /// Adds a whole row, one value per declared criterion in order.
    pub fn row(mut self, alternative: impl Into<AlternativeId>, row: &[f64]) -> Self {
        let alternative = alternative.into();
        let target = self.values.entry(alternative).or_default();
        for (crit, value) in self.criteria.iter().zip(row) {
            target.insert(crit.clone(), *value);
        }
        self
    }

    /// Builds the evaluation matrix.
    pub fn build(self) -> Evaluations {
        Evaluations::from_parts(self.alternatives, self.criteria, self.values)
    }
}
