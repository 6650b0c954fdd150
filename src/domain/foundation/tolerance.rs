//! Numeric tolerances shared by the outranking and sorting services.

use serde::{Deserialize, Serialize};

use super::McdaError;

/// Allowed distance between an observed outranking value and 0 or 1.
pub const DEFAULT_BINARY_TOLERANCE: f64 = 1e-3;

/// How far below the cut threshold a credibility may be and still count as 1.
pub const DEFAULT_CUT_TOLERANCE: f64 = 1e-5;

/// Slack allowed between the low and high weight windows of a progressive session.
pub const DEFAULT_PROGRESSIVE_WINDOW_TOLERANCE: f64 = 1e-6;

/// Relative overshoot above 1 of an aggregated index that is clamped rather than rejected.
pub const DEFAULT_AGGREGATE_OVERSHOOT: f64 = 0.1;

/// Overshoot above 1 of a cut threshold (λ / Σweights) that is rounded down to 1.
pub const DEFAULT_CUT_ROUNDING: f64 = 1e-6;

/// Every numeric tolerance used by the engine.
///
/// The defaults reproduce the reference outputs exactly; a single value can
/// be overridden through configuration without touching the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    #[serde(default = "default_binary")]
    pub binary: f64,
    #[serde(default = "default_cut")]
    pub cut: f64,
    #[serde(default = "default_progressive_window")]
    pub progressive_window: f64,
    #[serde(default = "default_aggregate_overshoot")]
    pub aggregate_overshoot: f64,
    #[serde(default = "default_cut_rounding")]
    pub cut_rounding: f64,
}

fn default_binary() -> f64 {
    DEFAULT_BINARY_TOLERANCE
}

fn default_cut() -> f64 {
    DEFAULT_CUT_TOLERANCE
}

fn default_progressive_window() -> f64 {
    DEFAULT_PROGRESSIVE_WINDOW_TOLERANCE
}

fn default_aggregate_overshoot() -> f64 {
    DEFAULT_AGGREGATE_OVERSHOOT
}

fn default_cut_rounding() -> f64 {
    DEFAULT_CUT_ROUNDING
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY_TOLERANCE,
            cut: DEFAULT_CUT_TOLERANCE,
            progressive_window: DEFAULT_PROGRESSIVE_WINDOW_TOLERANCE,
            aggregate_overshoot: DEFAULT_AGGREGATE_OVERSHOOT,
            cut_rounding: DEFAULT_CUT_ROUNDING,
        }
    }
}

impl Tolerances {
    /// Returns a copy with a different cut tolerance.
    pub fn with_cut(mut self, cut: f64) -> Self {
        self.cut = cut;
        self
    }

    /// Returns a copy with a different binary tolerance.
    pub fn with_binary(mut self, binary: f64) -> Self {
        self.binary = binary;
        self
    }

    /// Checks that every tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<(), McdaError> {
        let named = [
            ("binary", self.binary),
            ("cut", self.cut),
            ("progressive_window", self.progressive_window),
            ("aggregate_overshoot", self.aggregate_overshoot),
            ("cut_rounding", self.cut_rounding),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(McdaError::invalid_parameter(
                    format!("tolerances.{}", name),
                    format!("must be finite and non-negative, got {}", value),
                ));
            }
        }
        Ok(())
    }
}
