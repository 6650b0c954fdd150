//! Concordance (Electre) and preference (Promethee) indices.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use crate::domain::foundation::{
    AlternativeId, CriterionId, McdaError, PreferenceDirection, Tolerances,
};
use crate::domain::model::{ProblemData, RelationMatrix, Thresholds, Weights};

/// Which index a pairwise comparison computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStyle {
    /// Degree to which a is at least as good as b.
    Electre,
    /// Degree to which a is strictly preferred to b.
    Promethee,
}

impl fmt::Display for IndexStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexStyle::Electre => write!(f, "concordance"),
            IndexStyle::Promethee => write!(f, "preference"),
        }
    }
}

/// Computes concordance and preference matrices.
///
/// By default matrices cover every ordered pair of the data alternatives.
/// Rows and columns may be restricted to subsets, e.g. to compare
/// alternatives against profiles only.
#[derive(Debug, Clone, Default)]
pub struct Concordance {
    target_rows: Option<Vec<AlternativeId>>,
    target_columns: Option<Vec<AlternativeId>>,
    tolerances: Tolerances,
}

impl Concordance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Restricts the rows of computed matrices. Must be a subset of the data alternatives.
    pub fn with_target_rows(mut self, rows: Vec<AlternativeId>) -> Self {
        self.target_rows = Some(rows);
        self
    }

    /// Restricts the columns of computed matrices. Must be a subset of the data alternatives.
    pub fn with_target_columns(mut self, columns: Vec<AlternativeId>) -> Self {
        self.target_columns = Some(columns);
        self
    }

    /// Weighted concordance matrix.
    pub fn concordance(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
        weights: &Weights,
    ) -> Result<RelationMatrix, McdaError> {
        self.aggregate(data, thresholds, weights, IndexStyle::Electre)
    }

    /// Weighted preference matrix.
    pub fn preference(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
        weights: &Weights,
    ) -> Result<RelationMatrix, McdaError> {
        self.aggregate(data, thresholds, weights, IndexStyle::Promethee)
    }

    /// One partial concordance matrix per criterion, unweighted.
    pub fn concordances(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
    ) -> Result<BTreeMap<CriterionId, RelationMatrix>, McdaError> {
        self.partials(data, thresholds, IndexStyle::Electre)
    }

    /// One partial preference matrix per criterion, unweighted.
    pub fn preferences(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
    ) -> Result<BTreeMap<CriterionId, RelationMatrix>, McdaError> {
        self.partials(data, thresholds, IndexStyle::Promethee)
    }

    /// Concordance index of `eval1` over `eval2` on one criterion.
    pub fn concordance_pairwise(
        eval1: f64,
        eval2: f64,
        direction: PreferenceDirection,
        p: f64,
        q: f64,
    ) -> Result<f64, McdaError> {
        Self::pairwise(eval1, eval2, direction, p, q, IndexStyle::Electre)
    }

    /// Preference index of `eval1` over `eval2` on one criterion.
    pub fn preference_pairwise(
        eval1: f64,
        eval2: f64,
        direction: PreferenceDirection,
        p: f64,
        q: f64,
    ) -> Result<f64, McdaError> {
        Self::pairwise(eval1, eval2, direction, p, q, IndexStyle::Promethee)
    }

    /// Pairwise index in [0, 1].
    ///
    /// # Algorithm
    ///
    /// With d = eval1 - eval2 oriented by the direction, the index is
    /// 0 up to a first threshold, 1 from a second one, and linear between.
    /// Electre uses (-p, -q), Promethee uses (q, p).
    ///
    /// # Edge Cases
    ///
    /// - p < q: `ThresholdOrderViolation`
    /// - p = q = d: 1 for Electre, 0 for Promethee
    pub fn pairwise(
        eval1: f64,
        eval2: f64,
        direction: PreferenceDirection,
        p: f64,
        q: f64,
        style: IndexStyle,
    ) -> Result<f64, McdaError> {
        if p < q {
            return Err(McdaError::threshold_order(
                "(pairwise)",
                format!("preference threshold {} is smaller than indifference threshold {}", p, q),
            ));
        }
        let diff = direction.orient(eval1 - eval2);

        if p == q && diff == p {
            return Ok(match style {
                IndexStyle::Electre => 1.0,
                IndexStyle::Promethee => 0.0,
            });
        }

        let (first, second) = match style {
            IndexStyle::Electre => (-p, -q),
            IndexStyle::Promethee => (q, p),
        };
        let index = if diff <= first {
            0.0
        } else if diff >= second {
            1.0
        } else {
            (diff - first) / (second - first)
        };
        Ok(index)
    }

    fn aggregate(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
        weights: &Weights,
        style: IndexStyle,
    ) -> Result<RelationMatrix, McdaError> {
        self.check_inputs(data, thresholds)?;
        weights.assert_complete(data.criteria())?;
        let sum = weights.sum();
        if sum <= 0.0 {
            return Err(McdaError::invalid_parameter(
                "weights",
                "sum of weights must be strictly positive",
            ));
        }
        let limit = 1.0 + self.tolerances.aggregate_overshoot;

        let (rows, columns) = self.targets(data);
        let mut result = RelationMatrix::new();
        for row in rows {
            for column in columns {
                let mut total = 0.0;
                for crit in data.criteria() {
                    let weight = weights.weight(crit).unwrap_or(0.0);
                    total += weight * self.criterion_index(data, thresholds, crit, row, column, style)?;
                }
                total /= sum;
                if total > 1.0 {
                    if total > limit {
                        return Err(McdaError::numeric(format!(
                            "{} of {} over {} is {}, more than the allowed {}",
                            style, row, column, total, limit
                        )));
                    }
                    warn!(row = %row, column = %column, value = total, "Clamped aggregated {} to 1", style);
                    total = 1.0;
                }
                result.put(row, column, total);
            }
        }
        debug!(
            rows = rows.len(),
            columns = columns.len(),
            criteria = data.criteria().len(),
            "Computed {} matrix",
            style
        );
        Ok(result)
    }

    fn partials(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
        style: IndexStyle,
    ) -> Result<BTreeMap<CriterionId, RelationMatrix>, McdaError> {
        self.check_inputs(data, thresholds)?;
        let (rows, columns) = self.targets(data);
        let mut all = BTreeMap::new();
        for crit in data.criteria() {
            let mut matrix = RelationMatrix::new();
            for row in rows {
                for column in columns {
                    let value = self.criterion_index(data, thresholds, crit, row, column, style)?;
                    matrix.put(row, column, value);
                }
            }
            debug!(criterion = %crit, "Computed partial {} matrix", style);
            all.insert(crit.clone(), matrix);
        }
        Ok(all)
    }

    fn criterion_index(
        &self,
        data: &ProblemData,
        thresholds: &Thresholds,
        crit: &CriterionId,
        row: &AlternativeId,
        column: &AlternativeId,
        style: IndexStyle,
    ) -> Result<f64, McdaError> {
        let direction = data.scales.require_direction(crit)?;
        let eval1 = data.evaluations.require(row, crit)?;
        let eval2 = data.evaluations.require(column, crit)?;
        Self::pairwise(eval1, eval2, direction, thresholds.p(crit), thresholds.q(crit), style)
            .map_err(|err| match err {
                McdaError::ThresholdOrderViolation { reason, .. } => {
                    McdaError::threshold_order(crit, reason)
                }
                other => other,
            })
    }

    fn check_inputs(&self, data: &ProblemData, thresholds: &Thresholds) -> Result<(), McdaError> {
        let alternatives = data.alternatives();
        for (name, target) in [("target_rows", &self.target_rows), ("target_columns", &self.target_columns)] {
            if let Some(subset) = target {
                if let Some(stranger) = subset.iter().find(|alt| !alternatives.contains(alt)) {
                    return Err(McdaError::invalid_parameter(
                        name,
                        format!("'{}' is not one of the given alternatives", stranger),
                    ));
                }
            }
        }
        thresholds.assert_known_criteria(data.criteria())?;
        thresholds.assert_preference_above_indifference(data.criteria())?;
        data.assert_complete()
    }

    fn targets<'a>(&'a self, data: &'a ProblemData) -> (&'a [AlternativeId], &'a [AlternativeId]) {
        let rows = self.target_rows.as_deref().unwrap_or(data.alternatives());
        let columns = self.target_columns.as_deref().unwrap_or(data.alternatives());
        (rows, columns)
    }
}
