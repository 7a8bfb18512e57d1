// src/generator/mod.rs

pub mod client;
pub mod extract;

use std::fmt;

use serde_json::Value;

use crate::generator::client::{ChatApi, ChatError, ChatRequest};
use crate::generator::extract::extract_json;
use crate::models::question::QuestionSet;
use crate::quiz::validate::{ValidationError, validate};

const QUIZ_TEMPERATURE: f32 = 0.7;
const PHRASE_TEMPERATURE: f32 = 0.8;
const PHRASE_MAX_TOKENS: u32 = 100;

const QUIZ_SYSTEM_PROMPT: &str = "You are a trivia master. Generate exactly 10 multiple-choice \
    trivia questions in valid JSON format. Each question must have exactly 4 options and exactly \
    1 correct answer. The incorrect answers must be plausible and not obviously wrong.";

const PHRASE_SYSTEM_PROMPT: &str = "You are a witty trivia commentator. Generate short, engaging \
    phrases that reference the show or movie.";

const JSON_ONLY_SUFFIX: &str = "\n\nIMPORTANT: You MUST return ONLY valid JSON. Do not include \
    any text before or after the JSON. The JSON must be parseable.";

/// Generation failed; no quiz is registered. Carries a human-readable
/// cause including, for invalid content, the offending question index.
#[derive(Debug)]
pub enum GenerationError {
    /// The generator call itself failed (after the one capability retry,
    /// if that applied).
    Chat(ChatError),
    /// The extracted candidate was not parseable JSON.
    UnparseableContent(String),
    /// The payload parsed but failed validation.
    Invalid(ValidationError),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Chat(e) => write!(f, "Error generating quiz: {e}"),
            GenerationError::UnparseableContent(msg) => {
                write!(f, "Invalid JSON response from generator: {msg}")
            }
            GenerationError::Invalid(e) => write!(f, "Error validating generated quiz: {e}"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Score band for the performance phrase. Thresholds are absolute counts
/// against the fixed 10-question quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    Perfect,
    Decent,
    Weak,
    Poor,
}

impl PerformanceBand {
    pub fn classify(score: u32, total: u32) -> Self {
        if score == total {
            PerformanceBand::Perfect
        } else if score >= 6 {
            PerformanceBand::Decent
        } else if score >= 3 {
            PerformanceBand::Weak
        } else {
            PerformanceBand::Poor
        }
    }

    fn label(self) -> &'static str {
        match self {
            PerformanceBand::Perfect => "perfect",
            PerformanceBand::Decent => "decent",
            PerformanceBand::Weak => "weak",
            PerformanceBand::Poor => "poor",
        }
    }

    fn fallback_phrase(self, topic: &str) -> String {
        match self {
            PerformanceBand::Perfect => format!("Outstanding knowledge of {topic}!"),
            PerformanceBand::Decent => format!("Not bad! You know your {topic}."),
            PerformanceBand::Weak => format!("Time to rewatch {topic}!"),
            PerformanceBand::Poor => format!("You might want to brush up on {topic}."),
        }
    }
}

/// Drives the external generator: builds the prompt, negotiates the
/// structured-output capability, extracts and validates the payload.
pub struct TriviaGenerator {
    chat: Box<dyn ChatApi>,
}

impl TriviaGenerator {
    pub fn new(chat: Box<dyn ChatApi>) -> Self {
        Self { chat }
    }

    /// Generates a validated 10-question set for `topic`.
    ///
    /// The first attempt requests structured JSON output. If the client
    /// signals that the model rejects that flag, a single degraded retry
    /// goes out without it, with an appended JSON-only instruction. Any
    /// other failure, and any failure of the retry, ends the generation.
    pub async fn generate(&self, topic: &str) -> Result<QuestionSet, GenerationError> {
        let prompt = quiz_prompt(topic);
        let request = ChatRequest {
            system: QUIZ_SYSTEM_PROMPT.to_string(),
            user: prompt.clone(),
            temperature: QUIZ_TEMPERATURE,
            json_object: true,
            max_tokens: None,
        };

        let content = match self.chat.complete(request).await {
            Ok(content) => content,
            Err(ChatError::ResponseFormatUnsupported(reason)) => {
                tracing::warn!(
                    topic,
                    %reason,
                    "model rejected structured output, retrying in plain mode"
                );
                let degraded = ChatRequest {
                    system: QUIZ_SYSTEM_PROMPT.to_string(),
                    user: format!("{prompt}{JSON_ONLY_SUFFIX}"),
                    temperature: QUIZ_TEMPERATURE,
                    json_object: false,
                    max_tokens: None,
                };
                self.chat
                    .complete(degraded)
                    .await
                    .map_err(GenerationError::Chat)?
            }
            Err(e) => return Err(GenerationError::Chat(e)),
        };

        let candidate = extract_json(&content);
        let raw: Value = serde_json::from_str(candidate)
            .map_err(|e| GenerationError::UnparseableContent(e.to_string()))?;

        let set = validate(&raw, topic).map_err(GenerationError::Invalid)?;
        tracing::info!(topic, questions = set.questions.len(), "quiz generated");
        Ok(set)
    }

    /// Fetches a short topic-referencing phrase for a scored result.
    ///
    /// Cosmetic output: any failure falls back to a fixed per-band
    /// template, so this never fails the submission flow.
    pub async fn performance_phrase(&self, topic: &str, score: u32, total: u32) -> String {
        let band = PerformanceBand::classify(score, total);
        let request = ChatRequest {
            system: PHRASE_SYSTEM_PROMPT.to_string(),
            user: phrase_prompt(topic, score, total, band),
            temperature: PHRASE_TEMPERATURE,
            json_object: false,
            max_tokens: Some(PHRASE_MAX_TOKENS),
        };

        match self.chat.complete(request).await {
            Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
            Ok(_) => band.fallback_phrase(topic),
            Err(e) => {
                tracing::warn!(topic, error = %e, "performance phrase failed, using fallback");
                band.fallback_phrase(topic)
            }
        }
    }
}

fn quiz_prompt(topic: &str) -> String {
    format!(
        r#"Generate exactly 10 trivia questions about "{topic}".

Requirements:
- Each question must demonstrate deep knowledge of: plot, characters, actors, iconic moments
- For TV shows, include season-level understanding questions
- Each question must be multiple-choice with exactly 4 options
- Exactly 1 correct answer per question
- 3 plausible incorrect answers (not obviously wrong)
- Questions should vary in difficulty

Return the response as a JSON object with this exact structure:
{{
  "questions": [
    {{
      "question": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct_answer": "Option A"
    }}
  ]
}}

Generate exactly 10 questions. Make them challenging and interesting."#
    )
}

fn phrase_prompt(topic: &str, score: u32, total: u32, band: PerformanceBand) -> String {
    format!(
        r#"Generate a short, witty performance phrase (1-2 sentences max) for someone who scored {score}/{total} on a trivia quiz about "{topic}".

The performance level is: {band}

Requirements:
- The phrase should be connected to or reference the show/movie "{topic}"
- It should be appropriate for the score level ({band})
- Keep it fun and engaging
- Maximum 2 sentences
- Do not include the score in the phrase itself

Generate the phrase now:"#,
        band = band.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    /// Scripted generator: pops one canned reply per call and records
    /// every request it sees.
    struct ScriptedChat {
        replies: Mutex<Vec<Result<String, ChatError>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedChat {
        fn new(replies: Vec<Result<String, ChatError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn seen_requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatApi for ScriptedChat {
        async fn complete(&self, request: ChatRequest) -> Result<String, ChatError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .remove(0)
        }
    }

    fn well_formed_payload() -> String {
        let questions: Vec<_> = (1..=10)
            .map(|i| {
                json!({
                    "question": format!("Question {i}?"),
                    "options": [format!("A{i}"), format!("B{i}"), format!("C{i}"), format!("D{i}")],
                    "correct_answer": format!("A{i}"),
                })
            })
            .collect();
        json!({ "questions": questions }).to_string()
    }

    fn generator_with(replies: Vec<Result<String, ChatError>>) -> (TriviaGenerator, std::sync::Arc<ScriptedChat>) {
        let chat = std::sync::Arc::new(ScriptedChat::new(replies));

        struct Shared(std::sync::Arc<ScriptedChat>);
        #[async_trait]
        impl ChatApi for Shared {
            async fn complete(&self, request: ChatRequest) -> Result<String, ChatError> {
                self.0.complete(request).await
            }
        }

        (
            TriviaGenerator::new(Box::new(Shared(std::sync::Arc::clone(&chat)))),
            chat,
        )
    }

    #[tokio::test]
    async fn generate_returns_validated_set() {
        let (generator, chat) = generator_with(vec![Ok(well_formed_payload())]);

        let set = generator.generate("Example Show").await.unwrap();
        assert_eq!(set.topic, "Example Show");
        assert_eq!(set.questions.len(), 10);

        let requests = chat.seen_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].json_object);
        assert_eq!(requests[0].temperature, 0.7);
        assert!(requests[0].user.contains("\"Example Show\""));
    }

    #[tokio::test]
    async fn generate_handles_fenced_content() {
        let fenced = format!("Here is your quiz:\n```json\n{}\n```", well_formed_payload());
        let (generator, _) = generator_with(vec![Ok(fenced)]);

        let set = generator.generate("Example Show").await.unwrap();
        assert_eq!(set.questions.len(), 10);
    }

    #[tokio::test]
    async fn capability_rejection_triggers_single_degraded_retry() {
        let (generator, chat) = generator_with(vec![
            Err(ChatError::ResponseFormatUnsupported("no json_object".into())),
            Ok(well_formed_payload()),
        ]);

        let set = generator.generate("Example Show").await.unwrap();
        assert_eq!(set.questions.len(), 10);

        let requests = chat.seen_requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].json_object);
        assert!(!requests[1].json_object);
        assert!(requests[1].user.contains("return ONLY valid JSON"));
    }

    #[tokio::test]
    async fn no_second_retry_after_degraded_failure() {
        let (generator, chat) = generator_with(vec![
            Err(ChatError::ResponseFormatUnsupported("no json_object".into())),
            Err(ChatError::Api {
                status: 500,
                message: "boom".into(),
            }),
        ]);

        let err = generator.generate("Example Show").await.unwrap_err();
        assert!(matches!(err, GenerationError::Chat(ChatError::Api { .. })));
        assert_eq!(chat.seen_requests().len(), 2);
    }

    #[tokio::test]
    async fn transient_failures_are_not_retried() {
        let (generator, chat) = generator_with(vec![Err(ChatError::Http("timed out".into()))]);

        let err = generator.generate("Example Show").await.unwrap_err();
        assert!(matches!(err, GenerationError::Chat(ChatError::Http(_))));
        assert_eq!(chat.seen_requests().len(), 1);
    }

    #[tokio::test]
    async fn unparseable_content_fails_generation() {
        let (generator, _) = generator_with(vec![Ok("this is not json".into())]);

        let err = generator.generate("Example Show").await.unwrap_err();
        assert!(matches!(err, GenerationError::UnparseableContent(_)));
    }

    #[tokio::test]
    async fn invalid_content_fails_generation_with_cause() {
        let payload = json!({ "questions": [{"question": "only one"}] }).to_string();
        let (generator, _) = generator_with(vec![Ok(payload)]);

        let err = generator.generate("Example Show").await.unwrap_err();
        assert!(err.to_string().contains("Expected exactly 10 questions"));
    }

    #[tokio::test]
    async fn phrase_uses_generator_content() {
        let (generator, chat) = generator_with(vec![Ok("  That's how you do it!  ".into())]);

        let phrase = generator.performance_phrase("Example Show", 10, 10).await;
        assert_eq!(phrase, "That's how you do it!");

        let requests = chat.seen_requests();
        assert_eq!(requests[0].temperature, 0.8);
        assert_eq!(requests[0].max_tokens, Some(100));
        assert!(requests[0].user.contains("perfect"));
    }

    #[tokio::test]
    async fn phrase_falls_back_on_error() {
        let (generator, _) = generator_with(vec![Err(ChatError::Http("down".into()))]);

        let phrase = generator.performance_phrase("Example Show", 2, 10).await;
        assert_eq!(phrase, "You might want to brush up on Example Show.");
    }

    #[tokio::test]
    async fn phrase_falls_back_on_blank_content() {
        let (generator, _) = generator_with(vec![Ok("   ".into())]);

        let phrase = generator.performance_phrase("Example Show", 7, 10).await;
        assert_eq!(phrase, "Not bad! You know your Example Show.");
    }

    #[test]
    fn bands_classify_per_threshold() {
        assert_eq!(PerformanceBand::classify(10, 10), PerformanceBand::Perfect);
        assert_eq!(PerformanceBand::classify(9, 10), PerformanceBand::Decent);
        assert_eq!(PerformanceBand::classify(6, 10), PerformanceBand::Decent);
        assert_eq!(PerformanceBand::classify(5, 10), PerformanceBand::Weak);
        assert_eq!(PerformanceBand::classify(3, 10), PerformanceBand::Weak);
        assert_eq!(PerformanceBand::classify(2, 10), PerformanceBand::Poor);
        assert_eq!(PerformanceBand::classify(0, 10), PerformanceBand::Poor);
    }
}
