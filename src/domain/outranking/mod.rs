//! Outranking Module - Pairwise preference aggregation.
//!
//! # Components
//!
//! - `Concordance` - Electre concordance and Promethee preference indices
//! - `Discordance` - Per-criterion veto strength, linear or sharp
//! - `Outranking` - Credibility from concordance and discordances, optional cut
//! - `OutrankingFull` - The three above in one call, cut at λ / Σweights
//!
//! Every computation reads its inputs and returns fresh matrices. Diagnostics
//! such as the smallest separation travel in the returned outcome.

mod concordance;
mod credibility;
mod discordance;
mod full;

pub use concordance::{Concordance, IndexStyle};
pub use credibility::{Outranking, OutrankingOutcome};
pub use discordance::{Discordance, DiscordanceOutcome, DiscordanceStyle};
pub use full::OutrankingFull;
