// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{quiz, scores},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, scores, history).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, registry, generator).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/generate", post(quiz::generate_quiz))
        .route("/submit", post(quiz::submit_quiz));

    Router::new()
        .route("/", get(scores::health))
        .nest("/api/quiz", quiz_routes)
        .route("/api/scores", get(scores::get_scores))
        .route("/api/history", get(scores::get_history))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
