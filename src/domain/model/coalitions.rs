//! Criteria weights and the majority threshold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{CriterionId, McdaError};

/// Non-negative weight per criterion. Weights need not be normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(BTreeMap<CriterionId, f64>);

impl Weights {
    /// Creates an empty set of weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a weight.
    pub fn with(mut self, criterion: impl Into<CriterionId>, weight: f64) -> Self {
        self.0.insert(criterion.into(), weight);
        self
    }

    /// Weight of a criterion, if any.
    pub fn weight(&self, criterion: &CriterionId) -> Option<f64> {
        self.0.get(criterion).copied()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Criteria with a weight.
    pub fn criteria(&self) -> impl Iterator<Item = &CriterionId> {
        self.0.keys()
    }

    /// Number of weighted criteria.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no weight is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails unless weights cover exactly the given criteria and are non-negative.
    ///
    /// Weights on unknown criteria give `UnknownCriterion`; criteria without a
    /// weight give `IncompleteInput`.
    pub fn assert_complete(&self, criteria: &[CriterionId]) -> Result<(), McdaError> {
        if let Some(unknown) = self.criteria().find(|crit| !criteria.contains(crit)) {
            return Err(McdaError::unknown_criterion(unknown, "weights"));
        }
        let missing: Vec<String> = criteria
            .iter()
            .filter(|crit| !self.0.contains_key(crit))
            .map(|crit| crit.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(McdaError::incomplete(format!(
                "some criteria have no associated weights: {}",
                missing.join(", ")
            )));
        }
        if let Some((crit, w)) = self.0.iter().find(|(_, w)| **w < 0.0 || !w.is_finite()) {
            return Err(McdaError::invalid_parameter(
                format!("weights.{}", crit),
                format!("must be finite and non-negative, got {}", w),
            ));
        }
        Ok(())
    }
}

impl<C: Into<CriterionId>> FromIterator<(C, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (C, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, w)| (c.into(), w)).collect())
    }
}

/// Weights plus an optional majority threshold λ.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coalitions {
    pub weights: Weights,
    #[serde(default)]
    pub majority_threshold: Option<f64>,
}

impl Coalitions {
    /// Creates coalitions without a majority threshold.
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            majority_threshold: None,
        }
    }

    /// Sets the majority threshold.
    pub fn with_majority_threshold(mut self, lambda: f64) -> Self {
        self.majority_threshold = Some(lambda);
        self
    }

    /// Weight of a criterion, if any.
    pub fn weight(&self, criterion: &CriterionId) -> Option<f64> {
        self.weights.weight(criterion)
    }

    /// Sum of all weights.
    pub fn sum_of_weights(&self) -> f64 {
        self.weights.sum()
    }

    /// Majority threshold or `IncompleteInput`.
    pub fn require_majority_threshold(&self) -> Result<f64, McdaError> {
        self.majority_threshold
            .ok_or_else(|| McdaError::incomplete("missing majority threshold"))
    }

    /// Returns true if no weight and no threshold is set.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty() && self.majority_threshold.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crits(names: &[&str]) -> Vec<CriterionId> {
        names.iter().map(|n| CriterionId::new(*n)).collect()
    }

    #[test]
    fn sum_adds_all_weights() {
        let w: Weights = vec![("g1", 0.25), ("g2", 0.5)].into_iter().collect();
        assert!((w.sum() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn weight_on_unknown_criterion_is_rejected() {
        let w = Weights::new().with("g1", 1.0).with("g9", 1.0);
        let err = w.assert_complete(&crits(&["g1"])).unwrap_err();
        assert!(matches!(err, McdaError::UnknownCriterion { .. }));
    }

    #[test]
    fn missing_weight_is_incomplete_input() {
        let w = Weights::new().with("g1", 1.0);
        let err = w.assert_complete(&crits(&["g1", "g2"])).unwrap_err();
        assert!(matches!(err, McdaError::IncompleteInput { .. }));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let w = Weights::new().with("g1", -1.0);
        assert!(w.assert_complete(&crits(&["g1"])).is_err());
    }

    #[test]
    fn missing_majority_threshold_is_incomplete_input() {
        let c = Coalitions::new(Weights::new().with("g1", 1.0));
        assert!(c.require_majority_threshold().is_err());
        let c = c.with_majority_threshold(0.6);
        assert_eq!(c.require_majority_threshold().unwrap(), 0.6);
    }

    #[test]
    fn coalitions_deserialize_from_json() {
        let json = r#"{ "weights": { "g1": 0.4, "g2": 0.6 }, "majority_threshold": 0.7 }"#;
        let c: Coalitions = serde_json::from_str(json).unwrap();
        assert_eq!(c.weight(&CriterionId::new("g2")), Some(0.6));
        assert_eq!(c.majority_threshold, Some(0.7));
    }
}
