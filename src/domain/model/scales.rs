//! Criterion scales: value interval plus preference direction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Evaluations;
use crate::domain::foundation::{CriterionId, McdaError, PreferenceDirection};

const STEP_TOLERANCE: f64 = 1e-9;

/// Scale of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub direction: PreferenceDirection,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    /// Step of a discrete scale; `None` for a continuous one.
    #[serde(default)]
    pub step: Option<f64>,
}

impl Scale {
    /// Creates an unbounded continuous scale.
    pub fn new(direction: PreferenceDirection) -> Self {
        Self {
            direction,
            minimum: None,
            maximum: None,
            step: None,
        }
    }

    /// Returns true if the value lies within the bounds that are set and,
    /// on a stepped scale, on a step counted from the minimum.
    pub fn contains(&self, value: f64) -> bool {
        let within = self.minimum.map_or(true, |min| value >= min)
            && self.maximum.map_or(true, |max| value <= max);
        match self.step {
            Some(step) if step > 0.0 => {
                let steps = (value - self.minimum.unwrap_or(0.0)) / step;
                within && (steps - steps.round()).abs() <= STEP_TOLERANCE
            }
            _ => within,
        }
    }
}

/// Scales of all criteria of a problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scales(BTreeMap<CriterionId, Scale>);

impl Scales {
    /// Creates an empty set of scales.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates unbounded scales from directions only.
    pub fn from_directions<I, C>(directions: I) -> Self
    where
        I: IntoIterator<Item = (C, PreferenceDirection)>,
        C: Into<CriterionId>,
    {
        Self(
            directions
                .into_iter()
                .map(|(crit, dir)| (crit.into(), Scale::new(dir)))
                .collect(),
        )
    }

    /// Adds or replaces a scale.
    pub fn with(mut self, criterion: impl Into<CriterionId>, scale: Scale) -> Self {
        self.0.insert(criterion.into(), scale);
        self
    }

    /// Scale of a criterion.
    pub fn get(&self, criterion: &CriterionId) -> Option<&Scale> {
        self.0.get(criterion)
    }

    /// Preference direction of a criterion, if known.
    pub fn direction(&self, criterion: &CriterionId) -> Option<PreferenceDirection> {
        self.0.get(criterion).map(|scale| scale.direction)
    }

    /// Preference direction of a criterion or `IncompleteInput`.
    pub fn require_direction(&self, criterion: &CriterionId) -> Result<PreferenceDirection, McdaError> {
        self.direction(criterion).ok_or_else(|| {
            McdaError::incomplete(format!(
                "unknown preference direction for criterion '{}'",
                criterion
            ))
        })
    }

    /// All directions, keyed by criterion.
    pub fn directions(&self) -> BTreeMap<CriterionId, PreferenceDirection> {
        self.0
            .iter()
            .map(|(crit, scale)| (crit.clone(), scale.direction))
            .collect()
    }

    /// Criteria with a scale.
    pub fn criteria(&self) -> impl Iterator<Item = &CriterionId> {
        self.0.keys()
    }

    /// Fails unless every given criterion has a direction.
    pub fn assert_complete_directions<'a>(
        &self,
        criteria: impl IntoIterator<Item = &'a CriterionId>,
    ) -> Result<(), McdaError> {
        for crit in criteria {
            self.require_direction(crit)?;
        }
        Ok(())
    }

    /// Fails if an evaluation lies outside the scale of its criterion.
    ///
    /// Criteria without a scale and missing evaluations are skipped.
    pub fn assert_within_bounds(&self, evaluations: &Evaluations) -> Result<(), McdaError> {
        for crit in evaluations.columns() {
            let Some(scale) = self.0.get(crit) else {
                continue;
            };
            for alt in evaluations.rows() {
                match evaluations.get(alt, crit) {
                    Some(value) if !scale.contains(value) => {
                        return Err(McdaError::invalid_parameter(
                            crit.to_string(),
                            format!("evaluation {} of '{}' is outside the criterion scale", value, alt),
                        ));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
