//! Ordered categories separated by boundary profiles.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{AlternativeId, CategoryId, McdaError};

/// Categories ordered from worst to best with one profile between each
/// consecutive pair.
///
/// `profiles[i]` is the up profile of `categories[i]` and the down profile of
/// `categories[i + 1]`. The structure is complete when every category but the
/// best has an up profile and every category but the worst has a down
/// profile, i.e. there is exactly one profile fewer than categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatsAndProfs {
    /// Categories from worst to best.
    pub categories: Vec<CategoryId>,
    /// Boundary profiles from worst to best.
    pub profiles: Vec<AlternativeId>,
}

impl CatsAndProfs {
    /// Creates a builder.
    pub fn builder() -> CatsAndProfsBuilder {
        CatsAndProfsBuilder::default()
    }

    /// Categories from worst to best.
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    /// Categories from best to worst.
    pub fn categories_from_best(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.iter().rev()
    }

    /// Profiles from worst to best.
    pub fn profiles(&self) -> &[AlternativeId] {
        &self.profiles
    }

    /// Worst category.
    pub fn worst(&self) -> Option<&CategoryId> {
        self.categories.first()
    }

    /// Best category.
    pub fn best(&self) -> Option<&CategoryId> {
        self.categories.last()
    }

    /// Rank of a category, zero for the worst.
    pub fn index_of(&self, category: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Profile bounding the category from above, `None` for the best category.
    pub fn up_profile(&self, category: &CategoryId) -> Option<&AlternativeId> {
        self.index_of(category).and_then(|i| self.profiles.get(i))
    }

    /// Profile bounding the category from below, `None` for the worst category.
    pub fn down_profile(&self, category: &CategoryId) -> Option<&AlternativeId> {
        match self.index_of(category) {
            Some(i) if i > 0 => self.profiles.get(i - 1),
            _ => None,
        }
    }

    /// Returns true if the structure is complete and has no duplicates.
    pub fn is_complete(&self) -> bool {
        if self.categories.is_empty() || self.profiles.len() + 1 != self.categories.len() {
            return false;
        }
        let cats: HashSet<_> = self.categories.iter().collect();
        let profs: HashSet<_> = self.profiles.iter().collect();
        cats.len() == self.categories.len() && profs.len() == self.profiles.len()
    }

    /// Fails with `IncompleteInput` unless complete.
    pub fn assert_complete(&self) -> Result<(), McdaError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(McdaError::incomplete(format!(
                "categories are incomplete: {} categories, {} profiles",
                self.categories.len(),
                self.profiles.len()
            )))
        }
    }
}

/// Builder appending categories and profiles from worst to best.
#[derive(Debug, Default)]
pub struct CatsAndProfsBuilder {
    categories: Vec<CategoryId>,
    profiles: Vec<AlternativeId>,
}

impl CatsAndProfsBuilder {
    /// Appends a category above the current best one.
    pub fn category(mut self, id: impl Into<CategoryId>) -> Self {
        self.categories.push(id.into());
        self
    }

    /// Appends a profile above the current best one.
    pub fn profile(mut self, id: impl Into<AlternativeId>) -> Self {
        self.profiles.push(id.into());
        self
    }

    /// Builds the structure; completeness is checked by consumers.
    pub fn build(self) -> CatsAndProfs {
        CatsAndProfs {
            categories: self.categories,
            profiles: self.profiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_categories() -> CatsAndProfs {
        CatsAndProfs::builder()
            .category("bad")
            .profile("pBM")
            .category("medium")
            .profile("pMG")
            .category("good")
            .build()
    }

    #[test]
    fn three_categories_are_complete() {
        assert!(three_categories().is_complete());
    }

    #[test]
    fn profiles_bound_categories() {
        let cats = three_categories();
        let medium = CategoryId::new("medium");
        assert_eq!(cats.down_profile(&medium), Some(&AlternativeId::new("pBM")));
        assert_eq!(cats.up_profile(&medium), Some(&AlternativeId::new("pMG")));
        assert_eq!(cats.down_profile(&CategoryId::new("bad")), None);
        assert_eq!(cats.up_profile(&CategoryId::new("good")), None);
    }

    #[test]
    fn categories_from_best_reverses_order() {
        let cats = three_categories();
        let names: Vec<_> = cats.categories_from_best().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["good", "medium", "bad"]);
    }

    #[test]
    fn missing_profile_is_incomplete() {
        let cats = CatsAndProfs::builder()
            .category("bad")
            .category("good")
            .build();
        assert!(!cats.is_complete());
        assert!(matches!(
            cats.assert_complete(),
            Err(McdaError::IncompleteInput { .. })
        ));
    }

    #[test]
    fn empty_structure_is_incomplete() {
        assert!(!CatsAndProfs::default().is_complete());
    }

    #[test]
    fn single_category_without_profile_is_complete() {
        let cats = CatsAndProfs::builder().category("only").build();
        assert!(cats.is_complete());
        assert_eq!(cats.worst(), cats.best());
    }

    #[test]
    fn duplicate_category_is_incomplete() {
        let cats = CatsAndProfs::builder()
            .category("c")
            .profile("p")
            .category("c")
            .build();
        assert!(!cats.is_complete());
    }
}
