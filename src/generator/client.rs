// src/generator/client.rs

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// One chat-style request to the external generator.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// Ask the generator for structured (JSON-object) output.
    pub json_object: bool,
    pub max_tokens: Option<u32>,
}

/// Failure of a single generator call.
#[derive(Debug)]
pub enum ChatError {
    /// The generator rejected the structured-output flag. The orchestrator
    /// treats this as a capability signal and retries in degraded mode.
    ResponseFormatUnsupported(String),
    /// Transport-level failure, including request timeout.
    Http(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The API answered but the completion carried no content.
    EmptyContent,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::ResponseFormatUnsupported(msg) => {
                write!(f, "Structured output not supported: {msg}")
            }
            ChatError::Http(msg) => write!(f, "Request to generator failed: {msg}"),
            ChatError::Api { status, message } => {
                write!(f, "Generator API error {status}: {message}")
            }
            ChatError::EmptyContent => write!(f, "Empty response from generator"),
        }
    }
}

impl std::error::Error for ChatError {}

/// Seam between the orchestrator and the concrete generator service.
/// Production uses [`OpenAiClient`]; tests script the responses.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, ChatError>;
}

/// Chat-completions client for the OpenAI API.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Builds a client with a per-request timeout. Expiry surfaces as
    /// [`ChatError::Http`] and, from the orchestrator, as a failed
    /// generation.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl ChatApi for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, ChatError> {
        let mut payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
            "temperature": request.temperature,
        });
        if request.json_object {
            payload["response_format"] = json!({"type": "json_object"});
        }
        if let Some(max_tokens) = request.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if request.json_object && is_response_format_rejection(&body) {
                return Err(ChatError::ResponseFormatUnsupported(body));
            }
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ChatError::Http(e.to_string()))?;

        let content = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or("");
        if content.is_empty() {
            return Err(ChatError::EmptyContent);
        }
        Ok(content.to_string())
    }
}

/// Classifies an API error body as a structured-output rejection. The API
/// names the offending parameter in `error.param`; older models mention
/// the feature in the message text instead.
fn is_response_format_rejection(body: &str) -> bool {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return false;
    };
    if value.pointer("/error/param").and_then(Value::as_str) == Some("response_format") {
        return true;
    }
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .is_some_and(|msg| {
            let msg = msg.to_ascii_lowercase();
            msg.contains("response_format") || msg.contains("json_object")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_rejection_by_error_param() {
        let body = r#"{"error": {"message": "Invalid parameter", "param": "response_format", "code": null}}"#;
        assert!(is_response_format_rejection(body));
    }

    #[test]
    fn detects_rejection_by_message_text() {
        let body = r#"{"error": {"message": "This model does not support 'json_object'.", "param": null}}"#;
        assert!(is_response_format_rejection(body));
    }

    #[test]
    fn unrelated_errors_are_not_capability_signals() {
        let body = r#"{"error": {"message": "Rate limit reached", "param": null}}"#;
        assert!(!is_response_format_rejection(body));
        assert!(!is_response_format_rejection("not json at all"));
    }
}
