//! Axum route handlers for direct matching and the major catalog.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::matching::engine::{validate_top_k, MatchError};
use crate::matching::report::{recommend, Recommendations};
use crate::models::dimension::Dimension;
use crate::models::major::Major;
use crate::models::profile::UserProfile;
use crate::questionnaire::builder::{ProfileBuilder, ProfileError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// All four answers submitted at once. Accepts `analytical` or
/// `analytical_score` style keys; values may be numbers or numeric strings.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreSheet {
    #[serde(alias = "analytical_score")]
    pub analytical: Option<Value>,
    #[serde(alias = "creative_score")]
    pub creative: Option<Value>,
    #[serde(alias = "social_score")]
    pub social: Option<Value>,
    #[serde(alias = "technical_score")]
    pub technical: Option<Value>,
}

impl ScoreSheet {
    fn get(&self, dimension: Dimension) -> Option<&Value> {
        match dimension {
            Dimension::Analytical => self.analytical.as_ref(),
            Dimension::Creative => self.creative.as_ref(),
            Dimension::Social => self.social.as_ref(),
            Dimension::Technical => self.technical.as_ref(),
        }
        .filter(|v| !v.is_null())
    }

    /// A sheet that is not a complete, valid profile cannot be ranked.
    pub fn into_profile(self) -> Result<UserProfile, MatchError> {
        let mut builder = ProfileBuilder::new();
        for dimension in Dimension::ALL {
            if let Some(raw) = self.get(dimension) {
                builder.record_raw(dimension, raw).map_err(invalid_profile)?;
            }
        }
        builder.finalize().map_err(invalid_profile)
    }
}

fn invalid_profile(err: ProfileError) -> MatchError {
    let reason = err.to_string();
    match err {
        ProfileError::Validation { dimension, .. } => MatchError::InvalidProfile {
            reason,
            dimension: Some(dimension),
            missing: vec![],
        },
        ProfileError::Incomplete { missing } => MatchError::InvalidProfile {
            reason,
            dimension: None,
            missing,
        },
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub scores: ScoreSheet,
    pub top_k: Option<i64>,
}

/// Resolves an optional caller `top_k` against the configured default.
pub fn resolve_top_k(requested: Option<i64>, default: usize) -> Result<usize, MatchError> {
    requested.map_or(Ok(default), validate_top_k)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches
///
/// Ranks the catalog against a complete score sheet in one call.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Recommendations>, AppError> {
    let top_k = resolve_top_k(request.top_k, state.config.default_top_k)?;
    let profile = request.scores.into_profile()?;

    let report = recommend(&profile, state.catalog.majors(), top_k)?;
    info!(
        "Ranked {} majors (top_k={top_k}); best match {:?}",
        state.catalog.majors().len(),
        report.matches.first().map(|m| (&m.name, m.match_percentage))
    );
    Ok(Json(report))
}

/// GET /api/v1/majors
pub async fn handle_list_majors(State(state): State<AppState>) -> Json<Vec<Major>> {
    Json(state.catalog.majors().to_vec())
}
