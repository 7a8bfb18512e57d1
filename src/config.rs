// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Per-request timeout on external generator calls, overridable via
/// GENERATOR_TIMEOUT_SECS. Expiry surfaces as a failed generation.
const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 60;

/// How long a generated quiz stays retrievable, overridable via
/// QUIZ_TTL_SECS. Expired quizzes answer "quiz not found" on submission.
const DEFAULT_QUIZ_TTL_SECS: u64 = 3600;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub generator_timeout_secs: u64,
    pub quiz_ttl_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let openai_api_key = env::var("OPENAI_API_KEY")
            .expect("OPENAI_API_KEY must be set");

        let openai_model = env::var("OPENAI_MODEL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());

        let generator_timeout_secs = env::var("GENERATOR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_GENERATOR_TIMEOUT_SECS);

        let quiz_ttl_secs = env::var("QUIZ_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_QUIZ_TTL_SECS);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            openai_api_key,
            openai_model,
            generator_timeout_secs,
            quiz_ttl_secs,
            rust_log,
        }
    }
}
