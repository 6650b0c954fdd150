//! Strongly-typed identifier value objects.
//!
//! Alternatives, criteria and categories are opaque names. Equality is the
//! identity; ordering is lexicographic and only used for deterministic output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an alternative. A profile is an alternative playing the role
/// of a category boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeId(String);

impl AlternativeId {
    /// Creates an AlternativeId from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AlternativeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AlternativeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identifier of a criterion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(String);

impl CriterionId {
    /// Creates a CriterionId from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CriterionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CriterionId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identifier of a category in a sorting problem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Creates a CategoryId from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CategoryId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_with_same_name_are_equal() {
        assert_eq!(AlternativeId::new("a1"), AlternativeId::from("a1"));
        assert_ne!(AlternativeId::new("a1"), AlternativeId::new("a2"));
    }

    #[test]
    fn ids_display_their_name() {
        assert_eq!(format!("{}", CriterionId::new("price")), "price");
        assert_eq!(CategoryId::new("good").as_str(), "good");
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let json = serde_json::to_string(&AlternativeId::new("car-1")).unwrap();
        assert_eq!(json, "\"car-1\"");
    }

    #[test]
    fn id_deserializes_from_plain_string() {
        let id: CategoryId = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(id, CategoryId::new("medium"));
    }
}
