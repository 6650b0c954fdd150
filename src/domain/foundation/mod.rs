//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the preference direction, numeric tolerances and
//! the error type that form the vocabulary of the outranking domain.

mod direction;
mod errors;
mod ids;
mod tolerance;

pub use direction::PreferenceDirection;
pub use errors::{ErrorCode, McdaError};
pub use ids::{AlternativeId, CategoryId, CriterionId};
pub use tolerance::{
    Tolerances, DEFAULT_AGGREGATE_OVERSHOOT, DEFAULT_BINARY_TOLERANCE, DEFAULT_CUT_ROUNDING,
    DEFAULT_CUT_TOLERANCE, DEFAULT_PROGRESSIVE_WINDOW_TOLERANCE,
};
