// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a row of the 'quiz_attempts' table.
/// One row per scored submission; never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub user_name: String,
    pub quiz_topic: String,
    pub score: i32,
    pub total: i32,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// DTO wrapping a list of attempts, newest first.
#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub attempts: Vec<QuizAttempt>,
}

/// Query parameters for the per-user scores endpoint.
#[derive(Debug, Deserialize)]
pub struct ScoresQuery {
    pub user_name: String,
}
