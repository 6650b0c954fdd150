//! Valued relation matrix over alternatives.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{AlternativeId, McdaError};

/// Mapping (row, column) to a value, usually in [0, 1].
///
/// Holds concordance, discordance, preference or outranking values, or
/// zeros and ones after a cut. Rows and columns keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RelationData")]
pub struct RelationMatrix {
    rows: Vec<AlternativeId>,
    columns: Vec<AlternativeId>,
    pub(crate) entries: BTreeMap<AlternativeId, BTreeMap<AlternativeId, f64>>,
    #[serde(skip)]
    known_rows: BTreeSet<AlternativeId>,
    #[serde(skip)]
    known_columns: BTreeSet<AlternativeId>,
}

/// Wire shape of [`RelationMatrix`].
#[derive(Deserialize)]
struct RelationData {
    rows: Vec<AlternativeId>,
    columns: Vec<AlternativeId>,
    #[serde(default)]
    entries: BTreeMap<AlternativeId, BTreeMap<AlternativeId, f64>>,
}

impl From<RelationData> for RelationMatrix {
    fn from(data: RelationData) -> Self {
        let mut matrix = Self {
            entries: data.entries,
            ..Self::default()
        };
        for row in &data.rows {
            matrix.register_row(row);
        }
        for column in &data.columns {
            matrix.register_column(column);
        }
        matrix
    }
}

impl RelationMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    fn register_row(&mut self, row: &AlternativeId) {
        if self.known_rows.insert(row.clone()) {
            self.rows.push(row.clone());
        }
    }

    fn register_column(&mut self, column: &AlternativeId) {
        if self.known_columns.insert(column.clone()) {
            self.columns.push(column.clone());
        }
    }

    /// Sets a value, registering the row and column if new.
    pub fn put(&mut self, row: &AlternativeId, column: &AlternativeId, value: f64) {
        self.register_row(row);
        self.register_column(column);
        self.entries
            .entry(row.clone())
            .or_default()
            .insert(column.clone(), value);
    }

    /// Builder-style `put`.
    pub fn with(mut self, row: impl Into<AlternativeId>, column: impl Into<AlternativeId>, value: f64) -> Self {
        self.put(&row.into(), &column.into(), value);
        self
    }

    /// Value at (row, column), if present.
    pub fn get(&self, row: &AlternativeId, column: &AlternativeId) -> Option<f64> {
        self.entries.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Value at (row, column) or `MissingRelationEntry` naming `relation`.
    pub fn require(
        &self,
        relation: &str,
        row: &AlternativeId,
        column: &AlternativeId,
    ) -> Result<f64, McdaError> {
        self.get(row, column)
            .ok_or_else(|| McdaError::missing_entry(relation, row, column))
    }

    /// Ordered rows.
    pub fn rows(&self) -> &[AlternativeId] {
        &self.rows
    }

    /// Ordered columns.
    pub fn columns(&self) -> &[AlternativeId] {
        &self.columns
    }

    /// Number of values present.
    pub fn value_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the matrix holds no value.
    pub fn is_empty(&self) -> bool {
        self.value_count() == 0
    }

    /// Returns true if every (row, column) pair has a value.
    pub fn is_complete(&self) -> bool {
        self.value_count() == self.rows.len() * self.columns.len()
    }

    /// Returns true if rows and columns hold the same alternatives.
    pub fn is_square(&self) -> bool {
        self.known_rows == self.known_columns
    }

    /// Returns true if every value is within `tolerance` of 0 or 1.
    pub fn is_binary(&self, tolerance: f64) -> bool {
        self.values()
            .all(|v| (v - 1.0).abs() <= tolerance || v.abs() <= tolerance)
    }

    /// Iterates over all values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.values().flat_map(|r| r.values().copied())
    }

    /// Cuts the matrix: values greater than or equal to `threshold` become 1,
    /// others 0. Missing entries stay missing.
    pub fn cut(&self, threshold: f64) -> Result<RelationMatrix, McdaError> {
        if threshold.is_nan() {
            return Err(McdaError::invalid_parameter("threshold", "must not be NaN"));
        }
        let mut out = RelationMatrix {
            entries: BTreeMap::new(),
            ..self.clone()
        };
        for (row, values) in &self.entries {
            for (column, value) in values {
                out.put(row, column, if *value >= threshold { 1.0 } else { 0.0 });
            }
        }
        Ok(out)
    }

    /// Returns true if both matrices have the same entries up to `tolerance`.
    pub fn approx_eq(&self, other: &RelationMatrix, tolerance: f64) -> bool {
        if self.value_count() != other.value_count() {
            return false;
        }
        self.entries.iter().all(|(row, values)| {
            values.iter().all(|(column, v)| {
                other
                    .get(row, column)
                    .map_or(false, |o| (o - v).abs() <= tolerance)
            })
        })
    }

    /// Cell-wise minimum over the entries present in both matrices.
    pub fn intersection(&self, other: &RelationMatrix) -> RelationMatrix {
        let mut out = RelationMatrix::new();
        for row in &self.rows {
            for column in &self.columns {
                if let (Some(a), Some(b)) = (self.get(row, column), other.get(row, column)) {
                    out.put(row, column, a.min(b));
                }
            }
        }
        out
    }

    /// Removes an alternative both as a row and as a column.
    pub fn remove(&mut self, alternative: &AlternativeId) {
        if self.known_rows.remove(alternative) {
            self.rows.retain(|r| r != alternative);
        }
        if self.known_columns.remove(alternative) {
            self.columns.retain(|c| c != alternative);
        }
        self.entries.remove(alternative);
        for values in self.entries.values_mut() {
            values.remove(alternative);
        }
    }
}
