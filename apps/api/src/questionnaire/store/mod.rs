//! Session-scoped storage for answers collected between questionnaire steps.
//!
//! Only raw answers are stored. Each request replays them into a fresh
//! `ProfileBuilder`, so builders are never shared across requests.

mod in_memory;
mod redis_store;

pub use in_memory::InMemoryAnswerStore;
pub use redis_store::RedisAnswerStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::dimension::{Dimension, DimensionMap};

pub type StoredAnswers = DimensionMap<Option<f64>>;

#[derive(Debug, Error)]
pub enum AnswerStoreError {
    #[error("Answer store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Answers recorded so far. Unknown sessions yield an empty map.
    async fn load(&self, session_id: Uuid) -> Result<StoredAnswers, AnswerStoreError>;

    /// Overwrites a single dimension for the session.
    async fn put(
        &self,
        session_id: Uuid,
        dimension: Dimension,
        value: f64,
    ) -> Result<(), AnswerStoreError>;

    async fn clear(&self, session_id: Uuid) -> Result<(), AnswerStoreError>;
}
