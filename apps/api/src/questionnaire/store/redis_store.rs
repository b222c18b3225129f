//! Redis-backed answer store. Each session is a hash
//! `questionnaire:{session_id}` with one field per dimension, so a single
//! answer write is one atomic `HSET`.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::warn;
use uuid::Uuid;

use super::{AnswerStore, AnswerStoreError, StoredAnswers};
use crate::models::dimension::Dimension;

#[derive(Clone)]
pub struct RedisAnswerStore {
    conn: MultiplexedConnection,
    ttl_secs: i64,
}

impl RedisAnswerStore {
    pub fn new(conn: MultiplexedConnection, ttl_secs: i64) -> Self {
        Self { conn, ttl_secs }
    }

    fn key(session_id: Uuid) -> String {
        format!("questionnaire:{session_id}")
    }
}

fn unavailable(e: redis::RedisError) -> AnswerStoreError {
    AnswerStoreError::Unavailable(e.to_string())
}

/// Parses an `HGETALL` reply. Unknown fields and unparseable values are
/// skipped so a corrupt field only costs that one answer.
fn parse_fields(fields: HashMap<String, String>) -> StoredAnswers {
    let mut answers = StoredAnswers::default();
    for (field, raw) in fields {
        match (field.parse::<Dimension>(), raw.parse::<f64>()) {
            (Ok(dimension), Ok(value)) => answers[dimension] = Some(value),
            _ => warn!("Ignoring stored answer field '{field}'='{raw}'"),
        }
    }
    answers
}

#[async_trait]
impl AnswerStore for RedisAnswerStore {
    async fn load(&self, session_id: Uuid) -> Result<StoredAnswers, AnswerStoreError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn
            .hgetall(Self::key(session_id))
            .await
            .map_err(unavailable)?;
        Ok(parse_fields(fields))
    }

    async fn put(
        &self,
        session_id: Uuid,
        dimension: Dimension,
        value: f64,
    ) -> Result<(), AnswerStoreError> {
        let key = Self::key(session_id);
        let mut conn = self.conn.clone();

        conn.hset::<_, _, _, ()>(&key, dimension.as_str(), value.to_string())
            .await
            .map_err(unavailable)?;
        conn.expire::<_, ()>(&key, self.ttl_secs)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn clear(&self, session_id: Uuid) -> Result<(), AnswerStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::key(session_id))
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisAnswerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisAnswerStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
