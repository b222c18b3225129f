//! Match engine. Ranks catalog majors against a finalized profile.
//!
//! Pure and deterministic: the same (profile, catalog, top_k) always yields
//! the same results, so charts can be re-derived later from the same inputs.
//!
//! Algorithm:
//! 1. per dimension: `1 - |score/10 - weight|`, clamped to `[0, 1]`
//! 2. average the four terms, × 100, round to nearest integer
//!    (the per-dimension terms are also kept for display)
//! 3. stable sort descending (ties keep catalog order), truncate to `top_k`
//! 4. attach the user vector and the major vector (weights × 10, unclamped)

use thiserror::Error;

use crate::models::dimension::{Dimension, DimensionMap};
use crate::models::major::Major;
use crate::models::profile::UserProfile;

/// Factor mapping `[0, 1]` weights onto the `1..=10` answer scale.
pub const WEIGHT_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// `dimension` names a rejected value; `missing` lists unanswered dimensions.
    #[error("Profile is invalid: {reason}")]
    InvalidProfile {
        reason: String,
        dimension: Option<Dimension>,
        missing: Vec<Dimension>,
    },

    #[error("Major catalog is empty")]
    EmptyCatalog,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// One ranked major plus the paired vectors for a comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub major: &'a Major,
    pub match_percentage: u8,
    pub dimension_matches: DimensionMap<f64>,
    pub user_vector: [f64; Dimension::COUNT],
    pub major_vector: [f64; Dimension::COUNT],
}

/// Per-dimension closeness in `[0, 1]` between a profile and raw major weights.
pub fn dimension_matches(profile: &UserProfile, weights: &DimensionMap<f64>) -> DimensionMap<f64> {
    DimensionMap::from_fn(|d| {
        let term = 1.0 - (profile.score(d) / WEIGHT_SCALE - weights[d]).abs();
        term.clamp(0.0, 1.0)
    })
}

fn percentage_of(terms: &DimensionMap<f64>) -> u8 {
    let average = terms.values().iter().sum::<f64>() / Dimension::COUNT as f64;
    (average * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Match percentage in `0..=100` between a profile and raw major weights.
pub fn match_percentage(profile: &UserProfile, weights: &DimensionMap<f64>) -> u8 {
    percentage_of(&dimension_matches(profile, weights))
}

/// Major weights on the answer scale, for display beside the user's scores.
pub fn display_vector(weights: &DimensionMap<f64>) -> [f64; Dimension::COUNT] {
    weights.map(|_, w| w * WEIGHT_SCALE).values().to_owned()
}

/// Ranks `catalog` by fit and returns the best `top_k` entries.
pub fn rank<'a>(
    profile: &UserProfile,
    catalog: &'a [Major],
    top_k: usize,
) -> Result<Vec<MatchResult<'a>>, MatchError> {
    if top_k == 0 {
        return Err(MatchError::InvalidArgument(
            "top_k must be at least 1".to_string(),
        ));
    }
    if catalog.is_empty() {
        return Err(MatchError::EmptyCatalog);
    }

    let user_vector = profile.scores().values().to_owned();

    let mut results: Vec<MatchResult<'a>> = catalog
        .iter()
        .map(|major| {
            let terms = dimension_matches(profile, &major.weights);
            MatchResult {
                major,
                match_percentage: percentage_of(&terms),
                dimension_matches: terms,
                user_vector,
                major_vector: display_vector(&major.weights),
            }
        })
        .collect();

    // `sort_by` is stable, which keeps catalog order for equal percentages.
    results.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    results.truncate(top_k);

    Ok(results)
}

/// Converts a caller-supplied signed `top_k` into a count accepted by [`rank`].
pub fn validate_top_k(raw: i64) -> Result<usize, MatchError> {
    match usize::try_from(raw) {
        Ok(top_k) if top_k > 0 => Ok(top_k),
        _ => Err(MatchError::InvalidArgument(format!(
            "top_k must be at least 1, got {raw}"
        ))),
    }
}
