//! Progressive pessimistic assignment from interval evaluations.
//!
//! Evaluations arrive one criterion at a time as intervals [min, max]. Each
//! submission narrows, for every boundary, the window of concordant weight
//! the alternative can still reach, and with it the band of categories the
//! alternative may end up in. Vetoes are not considered.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::domain::foundation::{
    CategoryId, CriterionId, McdaError, PreferenceDirection, Tolerances,
};
use crate::domain::model::{CatsAndProfs, Coalitions, Evaluations, Scales};

/// Minimum and maximum concordant weight still reachable for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightWindow {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone)]
struct CriterionBoundaries {
    weight: f64,
    direction: PreferenceDirection,
    /// Profile values from worst to best.
    profiles: Vec<f64>,
}

/// One progressive assignment session for a single alternative.
///
/// Categories are indexed from 0 (worst). Sessions are not meant to be shared
/// between threads; create one per alternative.
#[derive(Debug, Clone)]
pub struct ProgressiveSession {
    categories: Vec<CategoryId>,
    criteria: BTreeMap<CriterionId, CriterionBoundaries>,
    lambda: f64,
    sum_of_weights: f64,
    tolerance: f64,
    windows: Vec<WeightWindow>,
    worst: usize,
    best: usize,
    seen: BTreeSet<CriterionId>,
}

impl ProgressiveSession {
    /// Creates a session over the coalition criteria.
    ///
    /// # Errors
    ///
    /// - `IncompleteInput` if the categories are incomplete, λ is missing, a
    ///   profile lacks an evaluation or a criterion lacks a direction
    pub fn new(
        categories: &CatsAndProfs,
        coalitions: &Coalitions,
        profiles_evaluations: &Evaluations,
        scales: &Scales,
        tolerances: &Tolerances,
    ) -> Result<Self, McdaError> {
        categories.assert_complete()?;
        let lambda = coalitions.require_majority_threshold()?;

        let mut criteria = BTreeMap::new();
        for crit in coalitions.weights.criteria() {
            let weight = coalitions.weight(crit).unwrap_or(0.0);
            let direction = scales.require_direction(crit)?;
            let mut profiles = Vec::with_capacity(categories.profiles().len());
            for profile in categories.profiles() {
                profiles.push(profiles_evaluations.require(profile, crit)?);
            }
            criteria.insert(
                crit.clone(),
                CriterionBoundaries {
                    weight,
                    direction,
                    profiles,
                },
            );
        }

        let mut session = Self {
            categories: categories.categories().to_vec(),
            criteria,
            lambda,
            sum_of_weights: coalitions.sum_of_weights(),
            tolerance: tolerances.progressive_window,
            windows: Vec::new(),
            worst: 0,
            best: 0,
            seen: BTreeSet::new(),
        };
        session.reset();
        Ok(session)
    }

    /// Restores the initial band: every category is possible again and no
    /// criterion has been submitted.
    pub fn reset(&mut self) {
        self.windows = vec![
            WeightWindow {
                low: 0.0,
                high: self.sum_of_weights,
            };
            self.categories.len()
        ];
        self.worst = 0;
        self.best = self.categories.len().saturating_sub(1);
        self.seen.clear();
    }

    /// Submits the evaluation interval of one criterion.
    ///
    /// # Algorithm
    ///
    /// For every category in the current band, compared with the profile
    /// below it: if the whole interval is at least as good as the profile,
    /// the weight counts for sure and the low window grows (raising the worst
    /// category once it reaches λ); if the whole interval is strictly worse,
    /// the weight is lost and the high window shrinks (lowering the best
    /// category once it drops below λ). An interval touching the profile
    /// keeps the weight reachable, as concordance counts equality as
    /// concordant.
    ///
    /// The session is left unchanged when an error is returned.
    ///
    /// # Errors
    ///
    /// - `UnknownCriterion` if the criterion has no weight
    /// - `InvalidParameter` if the criterion was already submitted or min > max
    /// - `NumericInconsistency` if a low window exceeds its high window
    pub fn submit(&mut self, criterion: &CriterionId, min: f64, max: f64) -> Result<(), McdaError> {
        let Some(bounds) = self.criteria.get(criterion) else {
            return Err(McdaError::unknown_criterion(criterion, "progressive session"));
        };
        if self.seen.contains(criterion) {
            return Err(McdaError::invalid_parameter(
                criterion.to_string(),
                "evaluation already submitted",
            ));
        }
        if min.is_nan() || max.is_nan() || min > max {
            return Err(McdaError::invalid_parameter(
                criterion.to_string(),
                format!("invalid interval [{}, {}]", min, max),
            ));
        }

        let mut windows = self.windows.clone();
        let (mut worst, mut best) = (self.worst, self.best);
        let mut cat = worst;
        while cat <= best {
            if cat == 0 {
                windows[cat].low += bounds.weight;
            } else {
                let profile = bounds.profiles[cat - 1];
                let (reaches, falls_short) = match bounds.direction {
                    PreferenceDirection::Maximize => (min >= profile, max < profile),
                    PreferenceDirection::Minimize => (max <= profile, min > profile),
                };
                if reaches {
                    windows[cat].low += bounds.weight;
                    if windows[cat].low >= self.lambda {
                        worst = cat;
                    }
                }
                if falls_short {
                    windows[cat].high -= bounds.weight;
                    if windows[cat].high < self.lambda {
                        best = cat - 1;
                    }
                }
            }
            let window = windows[cat];
            if window.low > window.high + self.tolerance {
                return Err(McdaError::numeric(format!(
                    "category {} has minimum weight {} above maximum weight {}",
                    self.categories[cat], window.low, window.high
                )));
            }
            cat += 1;
        }
        if worst > best {
            return Err(McdaError::numeric(format!(
                "worst possible category {} is above best possible category {}",
                self.categories[worst], self.categories[best]
            )));
        }

        self.windows = windows;
        self.worst = worst;
        self.best = best;
        self.seen.insert(criterion.clone());
        debug!(
            criterion = %criterion,
            worst = %self.categories[self.worst],
            best = %self.categories[self.best],
            "Narrowed progressive band"
        );
        Ok(())
    }

    /// Worst category still possible.
    pub fn worst_category(&self) -> &CategoryId {
        &self.categories[self.worst]
    }

    /// Best category still possible.
    pub fn best_category(&self) -> &CategoryId {
        &self.categories[self.best]
    }

    /// Every category still possible, worst first.
    pub fn band(&self) -> &[CategoryId] {
        &self.categories[self.worst..=self.best]
    }

    /// True once a single category remains.
    pub fn is_determined(&self) -> bool {
        self.worst == self.best
    }

    /// Weight window of a category, if it exists.
    pub fn window(&self, category: &CategoryId) -> Option<WeightWindow> {
        let index = self.categories.iter().position(|c| c == category)?;
        Some(self.windows[index])
    }
}
