//! In-memory answer store for development and tests. Answers are lost on
//! restart and are not shared between instances.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AnswerStore, AnswerStoreError, StoredAnswers};
use crate::models::dimension::Dimension;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAnswerStore {
    sessions: Arc<RwLock<HashMap<Uuid, StoredAnswers>>>,
}

impl InMemoryAnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl AnswerStore for InMemoryAnswerStore {
    async fn load(&self, session_id: Uuid) -> Result<StoredAnswers, AnswerStoreError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&session_id)
            .copied()
            .unwrap_or_default())
    }

    async fn put(
        &self,
        session_id: Uuid,
        dimension: Dimension,
        value: f64,
    ) -> Result<(), AnswerStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id).or_default()[dimension] = Some(value);
        Ok(())
    }

    async fn clear(&self, session_id: Uuid) -> Result<(), AnswerStoreError> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }
}
