//! Sorting Assigner - Electre Tri assignment from a binary outranking relation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{
    AlternativeId, CategoryId, McdaError, DEFAULT_BINARY_TOLERANCE,
};
use crate::domain::model::{Assignments, CatsAndProfs, MultiAssignments, RelationMatrix};

/// Assignment procedure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortingMode {
    /// Highest category whose down profile the alternative outranks.
    Pessimistic,
    /// Lowest category whose up profile strictly beats the alternative.
    Optimistic,
    /// Every category between the pessimistic and optimistic ones.
    #[default]
    Both,
}

/// Assigns alternatives to ordered categories.
///
/// The outranking relation is used as an oracle: each required cell must be
/// within the binary tolerance of 0 or 1.
#[derive(Debug, Clone, Copy)]
pub struct SortingAssigner {
    binary_tolerance: f64,
}

impl Default for SortingAssigner {
    fn default() -> Self {
        Self {
            binary_tolerance: DEFAULT_BINARY_TOLERANCE,
        }
    }
}

impl SortingAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary_tolerance(mut self, tolerance: f64) -> Self {
        self.binary_tolerance = tolerance;
        self
    }

    /// Assigns in the requested mode. Single assignments become singletons.
    pub fn assign(
        &self,
        mode: SortingMode,
        alternatives: &[AlternativeId],
        outranking: &RelationMatrix,
        categories: &CatsAndProfs,
    ) -> Result<MultiAssignments, McdaError> {
        match mode {
            SortingMode::Pessimistic => self
                .pessimistic(alternatives, outranking, categories)
                .map(MultiAssignments::from),
            SortingMode::Optimistic => self
                .optimistic(alternatives, outranking, categories)
                .map(MultiAssignments::from),
            SortingMode::Both => self.both(alternatives, outranking, categories),
        }
    }

    /// Pessimistic assignment.
    ///
    /// # Algorithm
    ///
    /// Scan categories from the best. The alternative goes to the first
    /// category whose down profile it outranks; the worst category, having no
    /// down profile, catches everything else.
    pub fn pessimistic(
        &self,
        alternatives: &[AlternativeId],
        outranking: &RelationMatrix,
        categories: &CatsAndProfs,
    ) -> Result<Assignments, McdaError> {
        self.check(alternatives, outranking, categories, SortingMode::Pessimistic)?;
        let mut assignments = Assignments::new();
        for alt in alternatives {
            let category = self.pessimistic_category(alt, outranking, categories)?;
            assignments.assign(alt.clone(), category.clone());
        }
        debug!(alternatives = assignments.len(), "Assigned pessimistically");
        Ok(assignments)
    }

    /// Optimistic assignment.
    ///
    /// # Algorithm
    ///
    /// Scan categories from the worst. The alternative goes to the first
    /// category whose up profile outranks it without being outranked by it;
    /// the best category, having no up profile, catches everything else.
    pub fn optimistic(
        &self,
        alternatives: &[AlternativeId],
        outranking: &RelationMatrix,
        categories: &CatsAndProfs,
    ) -> Result<Assignments, McdaError> {
        self.check(alternatives, outranking, categories, SortingMode::Optimistic)?;
        let mut assignments = Assignments::new();
        for alt in alternatives {
            let category = self.optimistic_category(alt, outranking, categories)?;
            assignments.assign(alt.clone(), category.clone());
        }
        debug!(alternatives = assignments.len(), "Assigned optimistically");
        Ok(assignments)
    }

    /// Interval between the pessimistic and optimistic categories, worst first.
    pub fn both(
        &self,
        alternatives: &[AlternativeId],
        outranking: &RelationMatrix,
        categories: &CatsAndProfs,
    ) -> Result<MultiAssignments, McdaError> {
        self.check(alternatives, outranking, categories, SortingMode::Both)?;
        let cats = categories.categories();
        let mut assignments = MultiAssignments::new();
        for alt in alternatives {
            let pessimistic = self.pessimistic_category(alt, outranking, categories)?;
            let optimistic = self.optimistic_category(alt, outranking, categories)?;
            let (Some(low), Some(high)) = (categories.index_of(pessimistic), categories.index_of(optimistic)) else {
                return Err(McdaError::incomplete(format!(
                    "category of '{}' is not among the given categories",
                    alt
                )));
            };
            let (from, to) = (low.min(high), low.max(high));
            assignments.assign(alt.clone(), cats[from..=to].to_vec());
        }
        debug!(alternatives = assignments.len(), "Assigned to intervals");
        Ok(assignments)
    }

    fn pessimistic_category<'c>(
        &self,
        alt: &AlternativeId,
        outranking: &RelationMatrix,
        categories: &'c CatsAndProfs,
    ) -> Result<&'c CategoryId, McdaError> {
        for category in categories.categories_from_best() {
            match categories.down_profile(category) {
                None => return Ok(category),
                Some(profile) => {
                    if self.outranks(outranking, alt, profile)? {
                        return Ok(category);
                    }
                }
            }
        }
        Err(McdaError::incomplete("no category to assign to"))
    }

    fn optimistic_category<'c>(
        &self,
        alt: &AlternativeId,
        outranking: &RelationMatrix,
        categories: &'c CatsAndProfs,
    ) -> Result<&'c CategoryId, McdaError> {
        for category in categories.categories() {
            match categories.up_profile(category) {
                None => return Ok(category),
                Some(profile) => {
                    if self.outranks(outranking, profile, alt)? && !self.outranks(outranking, alt, profile)? {
                        return Ok(category);
                    }
                }
            }
        }
        Err(McdaError::incomplete("no category to assign to"))
    }

    /// Reads a binary cell: true near 1, false near 0, error otherwise.
    fn outranks(
        &self,
        outranking: &RelationMatrix,
        row: &AlternativeId,
        column: &AlternativeId,
    ) -> Result<bool, McdaError> {
        let value = outranking.require("outranking", row, column)?;
        if (value - 1.0).abs() <= self.binary_tolerance {
            Ok(true)
        } else if value.abs() <= self.binary_tolerance {
            Ok(false)
        } else {
            Err(McdaError::non_binary(row, column, value))
        }
    }

    /// Validates every cell the mode will read before assigning anything.
    fn check(
        &self,
        alternatives: &[AlternativeId],
        outranking: &RelationMatrix,
        categories: &CatsAndProfs,
        mode: SortingMode,
    ) -> Result<(), McdaError> {
        categories.assert_complete()?;
        for alt in alternatives {
            for profile in categories.profiles() {
                self.outranks(outranking, alt, profile)?;
                if mode != SortingMode::Pessimistic {
                    self.outranks(outranking, profile, alt)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(name: &str) -> AlternativeId {
        AlternativeId::new(name)
    }

    fn cat(name: &str) -> CategoryId {
        CategoryId::new(name)
    }

    fn three_categories() -> CatsAndProfs {
        CatsAndProfs::builder()
            .category("bad")
            .profile("pBM")
            .category("medium")
            .profile("pMG")
            .category("good")
            .build()
    }

    /// Outranking of `a` over the two profiles and of the profiles over `a`.
    fn relation(a_over: [f64; 2], over_a: [f64; 2]) -> RelationMatrix {
        RelationMatrix::new()
            .with("a", "pBM", a_over[0])
            .with("a", "pMG", a_over[1])
            .with("pBM", "a", over_a[0])
            .with("pMG", "a", over_a[1])
    }

    // ───────────────────────────────────────────────────────────────
    // Pessimistic Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn outranking_lower_profile_only_gives_medium() {
        let outranking = relation([1.0, 0.0], [0.0, 1.0]);
        let result = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(result.category(&alt("a")), Some(&cat("medium")));
    }

    #[test]
    fn outranking_no_profile_gives_worst() {
        let outranking = relation([0.0, 0.0], [1.0, 1.0]);
        let result = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(result.category(&alt("a")), Some(&cat("bad")));
    }

    #[test]
    fn outranking_top_profile_gives_best() {
        let outranking = relation([1.0, 1.0], [0.0, 0.0]);
        let result = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(result.category(&alt("a")), Some(&cat("good")));
    }

    #[test]
    fn pessimistic_ignores_reverse_cells() {
        let outranking = RelationMatrix::new().with("a", "pBM", 1.0).with("a", "pMG", 0.0);
        let result = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(result.category(&alt("a")), Some(&cat("medium")));
    }

    // ───────────────────────────────────────────────────────────────
    // Optimistic Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn optimistic_stops_at_first_strictly_better_profile() {
        let outranking = relation([1.0, 0.0], [0.0, 1.0]);
        let result = SortingAssigner::new()
            .optimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(result.category(&alt("a")), Some(&cat("medium")));
    }

    #[test]
    fn incomparable_alternative_goes_up_optimistically() {
        // a and pMG are incomparable: neither outranks the other.
        let outranking = relation([1.0, 0.0], [0.0, 0.0]);
        let opt = SortingAssigner::new()
            .optimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        let pes = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(opt.category(&alt("a")), Some(&cat("good")));
        assert_eq!(pes.category(&alt("a")), Some(&cat("medium")));
    }

    // ───────────────────────────────────────────────────────────────
    // Both Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn both_spans_pessimistic_to_optimistic() {
        let outranking = relation([0.0, 0.0], [0.0, 0.0]);
        let result = SortingAssigner::new()
            .both(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(
            result.categories(&alt("a")),
            Some([cat("bad"), cat("medium"), cat("good")].as_slice())
        );
    }

    #[test]
    fn assign_dispatches_on_mode() {
        let outranking = relation([1.0, 0.0], [0.0, 1.0]);
        let assigner = SortingAssigner::new();
        for mode in [SortingMode::Pessimistic, SortingMode::Optimistic, SortingMode::Both] {
            let result = assigner
                .assign(mode, &[alt("a")], &outranking, &three_categories())
                .unwrap();
            assert_eq!(result.categories(&alt("a")), Some([cat("medium")].as_slice()));
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Precondition Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn values_within_tolerance_are_binary() {
        let outranking = relation([0.9995, 0.0004], [0.0, 1.0]);
        let result = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap();
        assert_eq!(result.category(&alt("a")), Some(&cat("medium")));
    }

    #[test]
    fn fuzzy_value_is_rejected() {
        let outranking = relation([0.5, 0.0], [0.0, 1.0]);
        let err = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap_err();
        assert!(matches!(err, McdaError::InvalidOutrankingValue { .. }));
    }

    #[test]
    fn fuzzy_value_in_unused_direction_is_still_checked_for_both() {
        let outranking = relation([1.0, 1.0], [0.4, 0.0]);
        let err = SortingAssigner::new()
            .both(&[alt("a")], &outranking, &three_categories())
            .unwrap_err();
        assert_eq!(err.code().to_string(), "INVALID_OUTRANKING_VALUE");
    }

    #[test]
    fn missing_cell_is_reported() {
        let outranking = RelationMatrix::new().with("a", "pMG", 0.0);
        let err = SortingAssigner::new()
            .pessimistic(&[alt("a")], &outranking, &three_categories())
            .unwrap_err();
        assert!(matches!(err, McdaError::MissingRelationEntry { .. }));
    }

    #[test]
    fn incomplete_categories_are_rejected() {
        let cats = CatsAndProfs::builder().category("bad").category("good").build();
        let err = SortingAssigner::new()
            .pessimistic(&[alt("a")], &RelationMatrix::new(), &cats)
            .unwrap_err();
        assert!(matches!(err, McdaError::IncompleteInput { .. }));
    }
}
