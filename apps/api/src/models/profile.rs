use serde::Serialize;

use crate::models::dimension::{Dimension, DimensionMap};

/// Lowest score a questionnaire answer may take.
pub const MIN_SCORE: f64 = 1.0;
/// Highest score a questionnaire answer may take.
pub const MAX_SCORE: f64 = 10.0;

/// A finalized questionnaire profile: one score in `[MIN_SCORE, MAX_SCORE]`
/// per dimension.
///
/// There are no mutators. The only way to obtain one is
/// `ProfileBuilder::finalize`, which guarantees completeness and range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserProfile {
    scores: DimensionMap<f64>,
}

impl UserProfile {
    /// Callers must have validated every score.
    pub(crate) fn from_validated(scores: DimensionMap<f64>) -> Self {
        debug_assert!(scores.values().iter().all(|s| is_valid_score(*s)));
        Self { scores }
    }

    pub fn score(&self, dimension: Dimension) -> f64 {
        self.scores[dimension]
    }

    pub fn scores(&self) -> &DimensionMap<f64> {
        &self.scores
    }
}

pub fn is_valid_score(value: f64) -> bool {
    value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value)
}
