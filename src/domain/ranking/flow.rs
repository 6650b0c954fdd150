//! Promethee flows over a preference matrix.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{AlternativeId, McdaError};
use crate::domain::model::RelationMatrix;

/// Score per alternative.
pub type Scores = BTreeMap<AlternativeId, f64>;

/// Which flow to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowType {
    /// How much an alternative is preferred to the others.
    Positive,
    /// How much the others are preferred to it.
    Negative,
    /// Positive minus negative.
    Net,
}

/// Flow computations.
pub struct Flow;

impl Flow {
    /// Flows of the given type.
    ///
    /// # Errors
    ///
    /// `IncompleteInput` if the matrix is not complete or not square.
    pub fn flows(flow_type: FlowType, preference: &RelationMatrix) -> Result<Scores, McdaError> {
        match flow_type {
            FlowType::Positive => Self::positive_flows(preference),
            FlowType::Negative => Self::negative_flows(preference),
            FlowType::Net => Self::net_flows(preference),
        }
    }

    /// Σx P(a, x) / (n - 1).
    pub fn positive_flows(preference: &RelationMatrix) -> Result<Scores, McdaError> {
        Self::sums(preference, |a, x| preference.require("preference", a, x))
            .map(|sums| Self::divided(preference, sums))
    }

    /// Σx P(x, a) / (n - 1).
    pub fn negative_flows(preference: &RelationMatrix) -> Result<Scores, McdaError> {
        Self::sums(preference, |a, x| preference.require("preference", x, a))
            .map(|sums| Self::divided(preference, sums))
    }

    /// Σx (P(a, x) - P(x, a)) / (n - 1).
    pub fn net_flows(preference: &RelationMatrix) -> Result<Scores, McdaError> {
        Self::net_flows_not_divided(preference).map(|sums| Self::divided(preference, sums))
    }

    /// Σx (P(a, x) - P(x, a)).
    pub fn net_flows_not_divided(preference: &RelationMatrix) -> Result<Scores, McdaError> {
        Self::sums(preference, |a, x| {
            Ok(preference.require("preference", a, x)? - preference.require("preference", x, a)?)
        })
    }

    fn sums<F>(preference: &RelationMatrix, term: F) -> Result<Scores, McdaError>
    where
        F: Fn(&AlternativeId, &AlternativeId) -> Result<f64, McdaError>,
    {
        Self::assert_square(preference)?;
        let mut scores = Scores::new();
        for a in preference.rows() {
            let mut sum = 0.0;
            for x in preference.rows() {
                sum += term(a, x)?;
            }
            scores.insert(a.clone(), sum);
        }
        Ok(scores)
    }

    // A single alternative has nobody to be compared with: its flows are 0.
    fn divided(preference: &RelationMatrix, mut sums: Scores) -> Scores {
        let others = preference.rows().len().saturating_sub(1);
        for value in sums.values_mut() {
            *value = if others == 0 { 0.0 } else { *value / others as f64 };
        }
        sums
    }

    fn assert_square(preference: &RelationMatrix) -> Result<(), McdaError> {
        if !preference.is_complete() {
            return Err(McdaError::incomplete("preference matrix is not complete"));
        }
        if !preference.is_square() {
            return Err(McdaError::incomplete("preference matrix is not square"));
        }
        Ok(())
    }
}
