//! Ranking Module - Orders over alternatives.
//!
//! # Components
//!
//! - `Dominance` - Large dominance preorder and strict dominance order
//! - `Flow` - Promethee positive, negative and net flows
//! - `SimpleDistillation` - Ascending and descending distillation by net flow
//! - `PrometheeProfiles` - Per-criterion net flows

mod distillation;
mod dominance;
mod flow;
mod promethee_profiles;

pub use distillation::SimpleDistillation;
pub use dominance::{Dominance, StrictDominance};
pub use flow::{Flow, FlowType, Scores};
pub use promethee_profiles::PrometheeProfiles;
