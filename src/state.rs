// src/state.rs

use std::sync::Arc;

use crate::config::Config;
use crate::generator::TriviaGenerator;
use crate::quiz::registry::QuizRegistry;
use axum::extract::FromRef;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub registry: Arc<QuizRegistry>,
    pub generator: Arc<TriviaGenerator>,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
