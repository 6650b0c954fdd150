//! Category assignments produced by sorting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{AlternativeId, CategoryId};

/// One category per alternative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignments(BTreeMap<AlternativeId, CategoryId>);

impl Assignments {
    /// Creates empty assignments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an alternative, replacing any previous category.
    pub fn assign(&mut self, alternative: AlternativeId, category: CategoryId) {
        self.0.insert(alternative, category);
    }

    /// Category of an alternative.
    pub fn category(&self, alternative: &AlternativeId) -> Option<&CategoryId> {
        self.0.get(alternative)
    }

    /// Assigned alternatives.
    pub fn alternatives(&self) -> impl Iterator<Item = &AlternativeId> {
        self.0.keys()
    }

    /// (alternative, category) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&AlternativeId, &CategoryId)> {
        self.0.iter()
    }

    /// Number of assigned alternatives.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A non-empty set of categories per alternative, ordered worst to best.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiAssignments(BTreeMap<AlternativeId, Vec<CategoryId>>);

impl MultiAssignments {
    /// Creates empty assignments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an alternative to the given categories, replacing previous ones.
    pub fn assign(&mut self, alternative: AlternativeId, categories: Vec<CategoryId>) {
        self.0.insert(alternative, categories);
    }

    /// Categories of an alternative.
    pub fn categories(&self, alternative: &AlternativeId) -> Option<&[CategoryId]> {
        self.0.get(alternative).map(Vec::as_slice)
    }

    /// Assigned alternatives.
    pub fn alternatives(&self) -> impl Iterator<Item = &AlternativeId> {
        self.0.keys()
    }

    /// (alternative, categories) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&AlternativeId, &Vec<CategoryId>)> {
        self.0.iter()
    }

    /// Number of assigned alternatives.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if every alternative has exactly one category.
    pub fn is_crisp(&self) -> bool {
        self.0.values().all(|cats| cats.len() == 1)
    }
}

impl From<Assignments> for MultiAssignments {
    fn from(single: Assignments) -> Self {
        Self(
            single
                .0
                .into_iter()
                .map(|(alt, cat)| (alt, vec![cat]))
                .collect(),
        )
    }
}
