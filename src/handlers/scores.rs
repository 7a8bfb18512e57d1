// src/handlers/scores.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::attempt::{QuizAttempt, ScoresQuery, ScoresResponse},
};

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Trivia API is running"
    }))
}

/// Retrieves all quiz attempts for one user, newest first.
pub async fn get_scores(
    State(pool): State<PgPool>,
    Query(query): Query<ScoresQuery>,
) -> Result<impl IntoResponse, AppError> {
    let attempts = sqlx::query_as::<_, QuizAttempt>(
        r#"
        SELECT user_name, quiz_topic, score, total, timestamp
        FROM quiz_attempts
        WHERE user_name = $1
        ORDER BY timestamp DESC
        "#,
    )
    .bind(&query.user_name)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch user attempts: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(ScoresResponse { attempts }))
}

/// Retrieves all quiz attempts across all users, newest first.
pub async fn get_history(
    State(pool): State<PgPool>,
) -> Result<impl IntoResponse, AppError> {
    let attempts = sqlx::query_as::<_, QuizAttempt>(
        r#"
        SELECT user_name, quiz_topic, score, total, timestamp
        FROM quiz_attempts
        ORDER BY timestamp DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch history: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(ScoresResponse { attempts }))
}
