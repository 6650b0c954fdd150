//! Outrank - Outranking-based multi-criteria decision aid
//!
//! This crate implements Electre concordance, discordance and outranking,
//! Electre Tri sorting (pessimistic, optimistic, progressive), dominance
//! analysis and Promethee flows over plain in-memory value objects.

pub mod config;
pub mod domain;
