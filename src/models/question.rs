// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of questions in every generated quiz.
pub const QUESTIONS_PER_QUIZ: usize = 10;

/// Number of answer options per question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single validated multiple-choice question.
///
/// Invariant (enforced by the validator, never re-checked downstream):
/// `options` holds exactly 4 unique strings and `correct_answer` is one
/// of them. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text. Serialized as `question` to match the wire format.
    #[serde(rename = "question")]
    pub text: String,

    pub options: Vec<String>,

    pub correct_answer: String,
}

/// The fixed-size collection of validated questions for one quiz,
/// together with the topic it was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    pub topic: String,
    pub questions: Vec<Question>,
}

/// Per-question breakdown of a scored submission. Order matches the
/// original question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    #[serde(rename = "question")]
    pub question_text: String,
    #[serde(rename = "selected")]
    pub selected_answer: String,
    #[serde(rename = "correct")]
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Result of scoring one submission against its stored question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub score: u32,
    pub results: Vec<QuestionResult>,
}

/// DTO for requesting a new quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub user_name: String,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
}

/// DTO returned after a quiz is generated and registered.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub quiz_id: String,
    pub questions: Vec<Question>,
}

/// DTO for submitting answers to a previously generated quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    pub quiz_id: String,
    #[validate(length(min = 1, max = 100))]
    pub user_name: String,
    #[validate(length(min = 10, max = 10))]
    pub answers: Vec<String>,
}

/// DTO returned after a submission is scored.
#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    pub score: u32,
    pub total: u32,
    pub results: Vec<QuestionResult>,
    pub performance_phrase: String,
}
