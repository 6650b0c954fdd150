//! Per-criterion preference, indifference and veto thresholds.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{CriterionId, McdaError};

/// Discrimination thresholds, each optional per criterion.
///
/// A missing preference or indifference threshold counts as zero. A missing
/// veto threshold means the criterion never vetoes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub preference: BTreeMap<CriterionId, f64>,
    #[serde(default)]
    pub indifference: BTreeMap<CriterionId, f64>,
    #[serde(default)]
    pub veto: BTreeMap<CriterionId, f64>,
}

impl Thresholds {
    /// Creates an empty set of thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preference threshold of a criterion.
    pub fn with_preference(mut self, criterion: impl Into<CriterionId>, value: f64) -> Self {
        self.preference.insert(criterion.into(), value);
        self
    }

    /// Sets the indifference threshold of a criterion.
    pub fn with_indifference(mut self, criterion: impl Into<CriterionId>, value: f64) -> Self {
        self.indifference.insert(criterion.into(), value);
        self
    }

    /// Sets the veto threshold of a criterion.
    pub fn with_veto(mut self, criterion: impl Into<CriterionId>, value: f64) -> Self {
        self.veto.insert(criterion.into(), value);
        self
    }

    /// Preference threshold, if set.
    pub fn preference_threshold(&self, criterion: &CriterionId) -> Option<f64> {
        self.preference.get(criterion).copied()
    }

    /// Indifference threshold, if set.
    pub fn indifference_threshold(&self, criterion: &CriterionId) -> Option<f64> {
        self.indifference.get(criterion).copied()
    }

    /// Veto threshold, if set.
    pub fn veto_threshold(&self, criterion: &CriterionId) -> Option<f64> {
        self.veto.get(criterion).copied()
    }

    /// Preference threshold, zero when missing.
    pub fn p(&self, criterion: &CriterionId) -> f64 {
        self.preference_threshold(criterion).unwrap_or(0.0)
    }

    /// Indifference threshold, zero when missing.
    pub fn q(&self, criterion: &CriterionId) -> f64 {
        self.indifference_threshold(criterion).unwrap_or(0.0)
    }

    /// Every criterion on which at least one threshold is defined.
    pub fn criteria(&self) -> BTreeSet<&CriterionId> {
        self.preference
            .keys()
            .chain(self.indifference.keys())
            .chain(self.veto.keys())
            .collect()
    }

    /// Fails with `UnknownCriterion` if a threshold is defined outside `known`.
    pub fn assert_known_criteria(&self, known: &[CriterionId]) -> Result<(), McdaError> {
        match self.criteria().into_iter().find(|crit| !known.contains(crit)) {
            Some(unknown) => Err(McdaError::unknown_criterion(unknown, "thresholds")),
            None => Ok(()),
        }
    }

    /// Fails with `ThresholdOrderViolation` if p < q on one of the criteria.
    pub fn assert_preference_above_indifference(
        &self,
        criteria: &[CriterionId],
    ) -> Result<(), McdaError> {
        for crit in criteria {
            let (p, q) = (self.p(crit), self.q(crit));
            if p < q {
                return Err(McdaError::threshold_order(
                    crit,
                    format!("preference threshold {} is smaller than indifference threshold {}", p, q),
                ));
            }
        }
        Ok(())
    }

    /// Fails with `ThresholdOrderViolation` if v < p on one of the criteria.
    pub fn assert_veto_above_preference(&self, criteria: &[CriterionId]) -> Result<(), McdaError> {
        for crit in criteria {
            if let Some(v) = self.veto_threshold(crit) {
                let p = self.p(crit);
                if v < p {
                    return Err(McdaError::threshold_order(
                        crit,
                        format!("veto threshold {} is smaller than preference threshold {}", v, p),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Checks p ≥ q and v ≥ p on every given criterion.
    pub fn validate_order(&self, criteria: &[CriterionId]) -> Result<(), McdaError> {
        self.assert_preference_above_indifference(criteria)?;
        self.assert_veto_above_preference(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crits(names: &[&str]) -> Vec<CriterionId> {
        names.iter().map(|n| CriterionId::new(*n)).collect()
    }

    #[test]
    fn missing_thresholds_default_to_zero() {
        let t = Thresholds::new();
        let g = CriterionId::new("g1");
        assert_eq!(t.p(&g), 0.0);
        assert_eq!(t.q(&g), 0.0);
        assert_eq!(t.veto_threshold(&g), None);
    }

    #[test]
    fn preference_below_indifference_is_rejected() {
        let t = Thresholds::new().with_preference("g1", 1.0).with_indifference("g1", 2.0);
        let err = t.assert_preference_above_indifference(&crits(&["g1"])).unwrap_err();
        assert!(matches!(err, McdaError::ThresholdOrderViolation { .. }));
    }

    #[test]
    fn veto_below_preference_is_rejected() {
        let t = Thresholds::new().with_preference("g1", 3.0).with_veto("g1", 2.0);
        assert!(t.assert_veto_above_preference(&crits(&["g1"])).is_err());
    }

    #[test]
    fn veto_without_preference_compares_to_zero() {
        let t = Thresholds::new().with_veto("g1", 2.0);
        assert!(t.assert_veto_above_preference(&crits(&["g1"])).is_ok());
    }

    #[test]
    fn thresholds_on_unknown_criteria_are_rejected() {
        let t = Thresholds::new().with_veto("g9", 2.0);
        let err = t.assert_known_criteria(&crits(&["g1", "g2"])).unwrap_err();
        assert!(matches!(err, McdaError::UnknownCriterion { .. }));
    }
}
