//! Sorting Module - Assignment of alternatives to ordered categories.
//!
//! # Components
//!
//! - `SortingAssigner` - Pessimistic, optimistic or interval assignment
//! - `ProgressiveSession` - Pessimistic band narrowed one criterion at a time
//! - `ConsistencyChecker` - Preconditions on coalitions, profiles and results
//! - `SortingEngine` - Coalition check, outranking and assignment in one call

mod assigner;
mod consistency;
mod full;
mod progressive;

pub use assigner::{SortingAssigner, SortingMode};
pub use consistency::ConsistencyChecker;
pub use full::{SortingEngine, SortingOutcome};
pub use progressive::{ProgressiveSession, WeightWindow};
