// src/handlers/quiz.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{
        GenerateQuizRequest, QuizResponse, SubmitQuizRequest, SubmitQuizResponse,
    },
    quiz::scoring,
    state::AppState,
};

/// Generates a quiz for the requested topic.
///
/// * Drives the external generator and validates its payload.
/// * Registers the validated set under a fresh quiz id.
/// * Returns the id together with the full question list.
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let set = state.generator.generate(&payload.topic).await?;
    let questions = set.questions.clone();
    let quiz_id = state.registry.create(set);

    tracing::info!(user = %payload.user_name, topic = %payload.topic, %quiz_id, "quiz registered");

    Ok(Json(QuizResponse { quiz_id, questions }))
}

/// Scores a submission against its stored quiz.
///
/// * 404 if the quiz id is unknown or has expired.
/// * 400 if the answer count does not match the question count; this is
///   checked here before the scoring engine re-checks it.
/// * Fetches a performance phrase (never fatal) and records the attempt.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let set = state
        .registry
        .get(&payload.quiz_id)
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    if payload.answers.len() != set.questions.len() {
        return Err(AppError::BadRequest(format!(
            "Expected {} answers, got {}",
            set.questions.len(),
            payload.answers.len()
        )));
    }

    let outcome = scoring::score(&set, &payload.answers)?;
    let total = set.questions.len() as u32;

    let performance_phrase = state
        .generator
        .performance_phrase(&set.topic, outcome.score, total)
        .await;

    sqlx::query(
        r#"
        INSERT INTO quiz_attempts (user_name, quiz_topic, score, total, timestamp)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&payload.user_name)
    .bind(&set.topic)
    .bind(outcome.score as i32)
    .bind(total as i32)
    .bind(chrono::Utc::now())
    .execute(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to record quiz attempt: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!(
        user = %payload.user_name,
        topic = %set.topic,
        score = outcome.score,
        total,
        "quiz attempt recorded"
    );

    Ok(Json(SubmitQuizResponse {
        score: outcome.score,
        total,
        results: outcome.results,
        performance_phrase,
    }))
}
