//! Preference direction of a criterion.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Whether larger or smaller evaluations are better on a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceDirection {
    Maximize,
    Minimize,
}

impl PreferenceDirection {
    /// Orients a raw difference so that a positive result always means "better".
    pub fn orient(&self, difference: f64) -> f64 {
        match self {
            PreferenceDirection::Maximize => difference,
            PreferenceDirection::Minimize => -difference,
        }
    }

    /// Compares two evaluations, `Ordering::Greater` meaning `a` is better than `b`.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        let natural = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            PreferenceDirection::Maximize => natural,
            PreferenceDirection::Minimize => natural.reverse(),
        }
    }
}

impl fmt::Display for PreferenceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PreferenceDirection::Maximize => "maximize",
            PreferenceDirection::Minimize => "minimize",
        };
        write!(f, "{}", s)
    }
}
