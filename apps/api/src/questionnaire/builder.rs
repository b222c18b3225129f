//! Profile builder. Assembles a validated `UserProfile` one questionnaire
//! step at a time.
//!
//! Revisiting a step overwrites the earlier answer. Nothing is averaged and no
//! history is kept. A builder is request-scoped: stored answers are replayed
//! into a fresh builder, and `finalize` consumes it.

use serde_json::Value;
use thiserror::Error;

use crate::models::dimension::{Dimension, DimensionMap};
use crate::models::profile::{is_valid_score, UserProfile, MAX_SCORE, MIN_SCORE};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("Invalid answer for {dimension}: {reason}")]
    Validation { dimension: Dimension, reason: String },

    #[error("Profile is incomplete; missing: {}", join_dimensions(.missing))]
    Incomplete { missing: Vec<Dimension> },
}

fn join_dimensions(dimensions: &[Dimension]) -> String {
    dimensions
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileBuilder {
    answers: DimensionMap<Option<f64>>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a builder from previously stored answers, validating each one.
    pub fn from_answers(answers: &DimensionMap<Option<f64>>) -> Result<Self, ProfileError> {
        let mut builder = Self::new();
        for (dimension, value) in answers.iter() {
            if let Some(value) = value {
                builder.record_answer(dimension, *value)?;
            }
        }
        Ok(builder)
    }

    /// Records `value` for `dimension`, replacing any earlier answer.
    /// On error the builder is left untouched.
    pub fn record_answer(&mut self, dimension: Dimension, value: f64) -> Result<(), ProfileError> {
        if !value.is_finite() {
            return Err(ProfileError::Validation {
                dimension,
                reason: "score must be a finite number".to_string(),
            });
        }
        if !is_valid_score(value) {
            return Err(ProfileError::Validation {
                dimension,
                reason: format!("score {value} is outside {MIN_SCORE}..={MAX_SCORE}"),
            });
        }
        self.answers[dimension] = Some(value);
        Ok(())
    }

    /// Like [`record_answer`](Self::record_answer), but accepts the raw JSON
    /// value a form submits: a number or a numeric string.
    pub fn record_raw(&mut self, dimension: Dimension, raw: &Value) -> Result<f64, ProfileError> {
        let value = coerce_answer(dimension, raw)?;
        self.record_answer(dimension, value)?;
        Ok(value)
    }

    pub fn answers(&self) -> &DimensionMap<Option<f64>> {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.answers.values().iter().all(Option::is_some)
    }

    /// Unanswered dimensions, in step order.
    pub fn missing(&self) -> Vec<Dimension> {
        self.answers
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(d, _)| d)
            .collect()
    }

    pub fn finalize(self) -> Result<UserProfile, ProfileError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ProfileError::Incomplete { missing });
        }
        let scores = self.answers.map(|_, v| v.unwrap_or(MIN_SCORE));
        Ok(UserProfile::from_validated(scores))
    }
}

/// Coerces a raw JSON answer into a number. Range is checked separately.
pub fn coerce_answer(dimension: Dimension, raw: &Value) -> Result<f64, ProfileError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ProfileError::Validation {
        dimension,
        reason: format!("expected a number, got {raw}"),
    })
}
