//! Axum route handlers for the step-by-step questionnaire.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::handlers::resolve_top_k;
use crate::matching::report::{recommend, Recommendations};
use crate::models::dimension::Dimension;
use crate::questionnaire::builder::ProfileBuilder;
use crate::questionnaire::steps::{self, QuestionStep, TOTAL_STEPS};
use crate::questionnaire::store::StoredAnswers;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub total_steps: usize,
    pub steps: Vec<QuestionStep>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub total_steps: usize,
    pub first_step: Option<QuestionStep>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionProgress {
    pub session_id: Uuid,
    pub answers: StoredAnswers,
    pub missing: Vec<Dimension>,
    pub complete: bool,
    pub next_step: Option<QuestionStep>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub step: usize,
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct AnswerRecorded {
    pub dimension: Dimension,
    pub value: f64,
    pub complete: bool,
    pub next_step: Option<QuestionStep>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitQuery {
    pub top_k: Option<i64>,
}

/// The first unanswered step, or `None` once every dimension has an answer.
fn next_step(builder: &ProfileBuilder) -> Option<QuestionStep> {
    builder
        .missing()
        .first()
        .and_then(|d| steps::step(steps::step_for(*d)))
}

async fn load_builder(state: &AppState, session_id: Uuid) -> Result<ProfileBuilder, AppError> {
    let stored = state.answers.load(session_id).await?;
    Ok(ProfileBuilder::from_answers(&stored)?)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/questionnaire/steps
pub async fn handle_list_steps() -> Json<StepsResponse> {
    Json(StepsResponse {
        total_steps: TOTAL_STEPS,
        steps: steps::all_steps(),
    })
}

/// GET /api/v1/questionnaire/steps/:step
pub async fn handle_get_step(Path(step): Path<usize>) -> Result<Json<QuestionStep>, AppError> {
    steps::step(step)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Step {step} does not exist")))
}

/// POST /api/v1/questionnaire/sessions
pub async fn handle_create_session() -> Json<SessionCreated> {
    let session_id = Uuid::new_v4();
    info!("Started questionnaire session {session_id}");
    Json(SessionCreated {
        session_id,
        total_steps: TOTAL_STEPS,
        first_step: steps::step(1),
        started_at: Utc::now(),
    })
}

/// GET /api/v1/questionnaire/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionProgress>, AppError> {
    let builder = load_builder(&state, session_id).await?;
    Ok(Json(SessionProgress {
        session_id,
        answers: *builder.answers(),
        missing: builder.missing(),
        complete: builder.is_complete(),
        next_step: next_step(&builder),
    }))
}

/// POST /api/v1/questionnaire/sessions/:id/answers
///
/// Records the answer for one step. Re-submitting a step replaces the
/// earlier answer. Invalid input leaves stored answers untouched.
pub async fn handle_record_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerRecorded>, AppError> {
    let step = steps::step(request.step).ok_or_else(|| {
        AppError::Validation(format!("step must be between 1 and {TOTAL_STEPS}"))
    })?;

    let mut builder = load_builder(&state, session_id).await?;
    let value = builder.record_raw(step.dimension, &request.value)?;
    state
        .answers
        .put(session_id, step.dimension, value)
        .await?;

    debug!(
        "Session {session_id}: recorded {}={value} (step {})",
        step.dimension, step.step
    );

    Ok(Json(AnswerRecorded {
        dimension: step.dimension,
        value,
        complete: builder.is_complete(),
        next_step: next_step(&builder),
    }))
}

/// POST /api/v1/questionnaire/sessions/:id/submit
///
/// Finalizes the session's profile and returns ranked recommendations.
/// Stored answers are cleared only after ranking succeeds.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SubmitQuery>,
) -> Result<Json<Recommendations>, AppError> {
    let top_k = resolve_top_k(query.top_k, state.config.default_top_k)?;
    let profile = load_builder(&state, session_id).await?.finalize()?;

    let report = recommend(&profile, state.catalog.majors(), top_k)?;
    state.answers.clear(session_id).await?;

    info!(
        "Session {session_id} submitted: personality {}, {} recommendations",
        report.personality.code,
        report.matches.len()
    );
    Ok(Json(report))
}
