use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::questionnaire::store::AnswerStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated afterwards.
    pub catalog: Arc<Catalog>,
    /// In-flight questionnaire answers. Default: InMemoryAnswerStore. Redis when REDIS_URL is set.
    pub answers: Arc<dyn AnswerStore>,
    pub config: Config,
}
