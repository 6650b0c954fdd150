//! Sorting configuration

use serde::Deserialize;

use crate::domain::foundation::Tolerances;
use crate::domain::outranking::DiscordanceStyle;
use crate::domain::sorting::{SortingEngine, SortingMode};

/// Sorting pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SortingConfig {
    /// Step-function vetoes instead of linear discordance
    #[serde(default = "default_sharp_vetoes")]
    pub sharp_vetoes: bool,

    /// Assignment procedure used by the binary
    #[serde(default)]
    pub mode: SortingMode,
}

impl SortingConfig {
    /// Discordance style selected by `sharp_vetoes`
    pub fn discordance_style(&self) -> DiscordanceStyle {
        if self.sharp_vetoes {
            DiscordanceStyle::SharpVeto
        } else {
            DiscordanceStyle::Linear
        }
    }

    /// Sorting engine configured with these settings
    pub fn engine(&self, tolerances: Tolerances) -> SortingEngine {
        SortingEngine::new(self.discordance_style(), tolerances)
    }
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            sharp_vetoes: default_sharp_vetoes(),
            mode: SortingMode::default(),
        }
    }
}

fn default_sharp_vetoes() -> bool {
    true
}
