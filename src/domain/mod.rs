//! Domain layer containing the decision aid computations and their types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, direction, tolerances, errors)
//! - `model` - Evaluations, thresholds, coalitions, categories and relations
//! - `outranking` - Concordance, discordance and outranking credibility
//! - `ranking` - Dominance, Promethee flows and distillation
//! - `sorting` - Electre Tri assignment, progressive and full pipelines

pub mod foundation;
pub mod model;
pub mod outranking;
pub mod ranking;
pub mod sorting;
