//! Simple distillation: rank by repeatedly extracting extreme net flows.

use tracing::debug;

use super::Flow;
use crate::domain::foundation::{AlternativeId, McdaError};
use crate::domain::model::{Preorder, RelationMatrix};

/// Ascending and descending distillation of a valued preference relation.
pub struct SimpleDistillation;

impl SimpleDistillation {
    /// Builds a preorder from the bottom: the alternatives with the lowest net
    /// flow are extracted first and end up at the worst rank.
    pub fn ascending(source: &RelationMatrix) -> Result<Preorder, McdaError> {
        let mut remaining = source.clone();
        let mut result = Preorder::new();
        while !remaining.rows().is_empty() {
            let group = Self::extract(&mut remaining, Extreme::Lowest)?;
            result.push_highest(group);
        }
        debug!(ranks = result.ranks_count(), "Computed ascending distillation");
        Ok(result)
    }

    /// Builds a preorder from the top: the alternatives with the highest net
    /// flow are extracted first and get rank 1.
    pub fn descending(source: &RelationMatrix) -> Result<Preorder, McdaError> {
        let mut remaining = source.clone();
        let mut result = Preorder::new();
        while !remaining.rows().is_empty() {
            let group = Self::extract(&mut remaining, Extreme::Highest)?;
            result.push_lowest(group);
        }
        debug!(ranks = result.ranks_count(), "Computed descending distillation");
        Ok(result)
    }

    /// Binary relation holding the pairs on which both distillations agree.
    pub fn intersection(source: &RelationMatrix) -> Result<RelationMatrix, McdaError> {
        let ascending = Self::ascending(source)?.as_relation();
        let descending = Self::descending(source)?.as_relation();
        Ok(ascending.intersection(&descending))
    }

    /// Removes the alternatives sharing the extreme net flow and returns them.
    fn extract(remaining: &mut RelationMatrix, extreme: Extreme) -> Result<Vec<AlternativeId>, McdaError> {
        let flows = Flow::net_flows(remaining)?;
        let target = match extreme {
            Extreme::Lowest => flows.values().copied().fold(f64::INFINITY, f64::min),
            Extreme::Highest => flows.values().copied().fold(f64::NEG_INFINITY, f64::max),
        };
        let group: Vec<AlternativeId> = remaining
            .rows()
            .iter()
            .filter(|alt| flows.get(*alt) == Some(&target))
            .cloned()
            .collect();
        if group.is_empty() {
            return Err(McdaError::numeric("net flows are not comparable numbers"));
        }
        for alt in &group {
            remaining.remove(alt);
        }
        Ok(group)
    }
}

#[derive(Debug, Clone, Copy)]
enum Extreme {
    Lowest,
    Highest,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(name: &str) -> AlternativeId {
        AlternativeId::new(name)
    }

    fn chain() -> RelationMatrix {
        // a > b > c, and nothing said about c against a.
        RelationMatrix::new()
            .with("a", "a", 0.0)
            .with("a", "b", 1.0)
            .with("a", "c", 0.0)
            .with("b", "a", 0.0)
            .with("b", "b", 0.0)
            .with("b", "c", 1.0)
            .with("c", "a", 0.0)
            .with("c", "b", 0.0)
            .with("c", "c", 0.0)
    }

    #[test]
    fn descending_puts_highest_flow_first() {
        let preorder = SimpleDistillation::descending(&chain()).unwrap();
        assert_eq!(preorder.rank_of(&alt("a")), Some(1));
        assert_eq!(preorder.rank_of(&alt("b")), Some(2));
        assert_eq!(preorder.rank_of(&alt("c")), Some(3));
    }

    #[test]
    fn ascending_puts_lowest_flow_last() {
        let preorder = SimpleDistillation::ascending(&chain()).unwrap();
        assert_eq!(preorder.rank_of(&alt("c")), Some(3));
        assert_eq!(preorder.rank_of(&alt("a")), Some(1));
    }

    #[test]
    fn ties_stay_together() {
        let m = RelationMatrix::new()
            .with("a", "a", 0.0)
            .with("a", "b", 0.5)
            .with("b", "a", 0.5)
            .with("b", "b", 0.0);
        let preorder = SimpleDistillation::descending(&m).unwrap();
        assert_eq!(preorder.ranks_count(), 1);
        assert_eq!(preorder.len(), 2);
    }

    #[test]
    fn intersection_of_agreeing_distillations() {
        let rel = SimpleDistillation::intersection(&chain()).unwrap();
        assert_eq!(rel.get(&alt("a"), &alt("c")), Some(1.0));
        assert_eq!(rel.get(&alt("c"), &alt("a")), Some(0.0));
        assert!(rel.is_complete());
    }

    #[test]
    fn empty_matrix_gives_empty_preorder() {
        assert!(SimpleDistillation::ascending(&RelationMatrix::new()).unwrap().is_empty());
    }

    #[test]
    fn incomplete_matrix_is_rejected() {
        let m = RelationMatrix::new().with("a", "b", 1.0).with("b", "a", 0.0);
        assert!(SimpleDistillation::descending(&m).is_err());
    }
}
