//! Complete preorder over alternatives, stored as ranks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::RelationMatrix;
use crate::domain::foundation::AlternativeId;

/// A complete preorder: alternatives grouped into ranks, rank 1 being the best.
///
/// Alternatives sharing a rank are ex aequo and each is at least as good as
/// the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preorder {
    ranks: Vec<Vec<AlternativeId>>,
}

impl Preorder {
    /// Creates an empty preorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a preorder from ranks ordered best first. Empty ranks are dropped.
    pub fn from_ranks(ranks: Vec<Vec<AlternativeId>>) -> Self {
        Self {
            ranks: ranks.into_iter().filter(|rank| !rank.is_empty()).collect(),
        }
    }

    /// Puts the given alternatives in a new rank below every existing one.
    pub fn push_lowest(&mut self, alternatives: Vec<AlternativeId>) {
        if !alternatives.is_empty() {
            self.ranks.push(alternatives);
        }
    }

    /// Puts the given alternatives in a new rank above every existing one.
    pub fn push_highest(&mut self, alternatives: Vec<AlternativeId>) {
        if !alternatives.is_empty() {
            self.ranks.insert(0, alternatives);
        }
    }

    /// Ranks from best to worst.
    pub fn ranks(&self) -> &[Vec<AlternativeId>] {
        &self.ranks
    }

    /// Number of distinct ranks.
    pub fn ranks_count(&self) -> usize {
        self.ranks.len()
    }

    /// Alternatives at the given rank, counting from 1.
    pub fn rank(&self, rank: usize) -> Option<&[AlternativeId]> {
        rank.checked_sub(1)
            .and_then(|i| self.ranks.get(i))
            .map(Vec::as_slice)
    }

    /// Rank of an alternative, counting from 1.
    pub fn rank_of(&self, alternative: &AlternativeId) -> Option<usize> {
        self.ranks
            .iter()
            .position(|rank| rank.contains(alternative))
            .map(|i| i + 1)
    }

    /// Every ranked alternative, best first.
    pub fn alternatives(&self) -> impl Iterator<Item = &AlternativeId> {
        self.ranks.iter().flatten()
    }

    /// Number of ranked alternatives.
    pub fn len(&self) -> usize {
        self.ranks.iter().map(Vec::len).sum()
    }

    /// Returns true if nothing is ranked.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Intersection with another preorder over the same alternatives.
    ///
    /// The pair (a, b) is kept only if a is at least as good as b in both
    /// preorders. Returns `None` when the result is not a complete preorder,
    /// which happens as soon as the two preorders disagree strictly on a pair.
    ///
    /// # Algorithm
    ///
    /// Alternatives are sorted by (rank here, rank there). The intersection is
    /// complete iff the second ranks are then non-decreasing; its ranks are
    /// the groups sharing both ranks.
    pub fn intersection(&self, other: &Preorder) -> Option<Preorder> {
        let mut keyed: Vec<(usize, usize, &AlternativeId)> = Vec::with_capacity(self.len());
        for alternative in self.alternatives() {
            let mine = self.rank_of(alternative)?;
            let theirs = other.rank_of(alternative)?;
            keyed.push((mine, theirs, alternative));
        }
        if keyed.len() != other.len() {
            return None;
        }
        keyed.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        if keyed.windows(2).any(|w| w[1].1 < w[0].1) {
            return None;
        }

        let mut grouped: BTreeMap<(usize, usize), Vec<AlternativeId>> = BTreeMap::new();
        for (mine, theirs, alternative) in keyed {
            grouped
                .entry((mine, theirs))
                .or_default()
                .push(alternative.clone());
        }
        Some(Preorder::from_ranks(grouped.into_values().collect()))
    }

    /// The alternatives from worst to best when every rank is a singleton.
    pub fn total_order(&self) -> Option<Vec<AlternativeId>> {
        if self.ranks.iter().any(|rank| rank.len() != 1) {
            return None;
        }
        Some(self.ranks.iter().rev().flatten().cloned().collect())
    }

    /// Binary relation where (a, b) is 1 iff a is at least as good as b.
    pub fn as_relation(&self) -> RelationMatrix {
        let mut relation = RelationMatrix::new();
        for (i, row_rank) in self.ranks.iter().enumerate() {
            for row in row_rank {
                for (j, column_rank) in self.ranks.iter().enumerate() {
                    for column in column_rank {
                        relation.put(row, column, if i <= j { 1.0 } else { 0.0 });
                    }
                }
            }
        }
        relation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<AlternativeId> {
        names.iter().map(|n| AlternativeId::new(*n)).collect()
    }

    fn preorder(ranks: &[&[&str]]) -> Preorder {
        Preorder::from_ranks(ranks.iter().map(|r| ids(r)).collect())
    }

    #[test]
    fn rank_of_counts_from_one() {
        let p = preorder(&[&["a"], &["b", "c"]]);
        assert_eq!(p.rank_of(&AlternativeId::new("a")), Some(1));
        assert_eq!(p.rank_of(&AlternativeId::new("c")), Some(2));
        assert_eq!(p.rank(2), Some(ids(&["b", "c"]).as_slice()));
        assert_eq!(p.rank(0), None);
    }

    #[test]
    fn intersection_refines_ties() {
        let first = preorder(&[&["a", "b"], &["c"]]);
        let second = preorder(&[&["a"], &["b", "c"]]);
        let inter = first.intersection(&second).unwrap();
        assert_eq!(inter, preorder(&[&["a"], &["b"], &["c"]]));
    }

    #[test]
    fn intersection_of_opposite_orders_is_conflict() {
        let first = preorder(&[&["a"], &["b"]]);
        let second = preorder(&[&["b"], &["a"]]);
        assert!(first.intersection(&second).is_none());
    }

    #[test]
    fn intersection_keeps_common_ties() {
        let first = preorder(&[&["a", "b"]]);
        let second = preorder(&[&["a", "b"]]);
        assert_eq!(first.intersection(&second).unwrap().ranks_count(), 1);
    }

    #[test]
    fn intersection_over_different_sets_is_none() {
        let first = preorder(&[&["a"], &["b"]]);
        let second = preorder(&[&["a"]]);
        assert!(first.intersection(&second).is_none());
    }

    #[test]
    fn total_order_goes_from_worst_to_best() {
        let p = preorder(&[&["a"], &["b"], &["c"]]);
        assert_eq!(p.total_order(), Some(ids(&["c", "b", "a"])));
    }

    #[test]
    fn ties_have_no_total_order() {
        assert!(preorder(&[&["a", "b"]]).total_order().is_none());
    }

    #[test]
    fn relation_is_reflexive_and_follows_ranks() {
        let rel = preorder(&[&["a"], &["b", "c"]]).as_relation();
        let (a, b, c) = (AlternativeId::new("a"), AlternativeId::new("b"), AlternativeId::new("c"));
        assert_eq!(rel.get(&a, &a), Some(1.0));
        assert_eq!(rel.get(&a, &b), Some(1.0));
        assert_eq!(rel.get(&b, &a), Some(0.0));
        assert_eq!(rel.get(&b, &c), Some(1.0));
        assert_eq!(rel.get(&c, &b), Some(1.0));
        assert!(rel.is_complete());
    }
}
