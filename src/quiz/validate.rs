// src/quiz/validate.rs

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use crate::models::question::{
    OPTIONS_PER_QUESTION, QUESTIONS_PER_QUIZ, Question, QuestionSet,
};

/// Rejection of a raw generated payload. Question-level failures carry the
/// 1-based index of the offending question so the caller can render a
/// precise message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NotAnObject,
    MissingQuestionsKey,
    QuestionsNotAnArray,
    WrongQuestionCount(usize),
    Question { index: usize, reason: QuestionError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionError {
    NotAnObject,
    MissingField(&'static str),
    NonScalarField(&'static str),
    OptionsNotAnArray,
    WrongOptionCount(usize),
    DuplicateOptions,
    CorrectAnswerNotAnOption,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnObject => write!(f, "Response is not a JSON object"),
            ValidationError::MissingQuestionsKey => write!(f, "Response missing 'questions' key"),
            ValidationError::QuestionsNotAnArray => write!(f, "'questions' must be an array"),
            ValidationError::WrongQuestionCount(got) => write!(
                f,
                "Expected exactly {QUESTIONS_PER_QUIZ} questions, got {got}"
            ),
            ValidationError::Question { index, reason } => match reason {
                QuestionError::NotAnObject => write!(f, "Question {index} is not an object"),
                QuestionError::MissingField(name) => {
                    write!(f, "Question {index} missing '{name}' field")
                }
                QuestionError::NonScalarField(name) => {
                    write!(f, "Question {index} '{name}' must be a string")
                }
                QuestionError::OptionsNotAnArray => {
                    write!(f, "Question {index} 'options' must be an array")
                }
                QuestionError::WrongOptionCount(got) => write!(
                    f,
                    "Question {index} must have exactly {OPTIONS_PER_QUESTION} options, got {got}"
                ),
                QuestionError::DuplicateOptions => {
                    write!(f, "Question {index} options must be unique")
                }
                QuestionError::CorrectAnswerNotAnOption => {
                    write!(f, "Question {index} 'correct_answer' must be one of the options")
                }
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates and normalizes a raw generated payload into a [`QuestionSet`].
///
/// The payload must be an object whose `questions` field is an array of
/// exactly 10 question objects. Unexpected shapes are rejected, never
/// coerced. Scalar fields that arrive as JSON numbers or booleans are
/// normalized to strings, so a generator answering `"correct_answer": 4`
/// with `"options": [2, 4, 6, 8]` still validates. All-or-nothing: no
/// partial set is ever returned.
pub fn validate(raw: &Value, topic: &str) -> Result<QuestionSet, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let questions_value = object
        .get("questions")
        .ok_or(ValidationError::MissingQuestionsKey)?;
    let entries = questions_value
        .as_array()
        .ok_or(ValidationError::QuestionsNotAnArray)?;

    if entries.len() != QUESTIONS_PER_QUIZ {
        return Err(ValidationError::WrongQuestionCount(entries.len()));
    }

    let mut questions = Vec::with_capacity(QUESTIONS_PER_QUIZ);
    for (i, entry) in entries.iter().enumerate() {
        let question = validate_question(entry)
            .map_err(|reason| ValidationError::Question { index: i + 1, reason })?;
        questions.push(question);
    }

    Ok(QuestionSet {
        topic: topic.to_string(),
        questions,
    })
}

fn validate_question(entry: &Value) -> Result<Question, QuestionError> {
    let object = entry.as_object().ok_or(QuestionError::NotAnObject)?;

    // Field presence is checked for all three before any shape check, so
    // the first error a broken payload produces is always a missing field.
    let text_value = object
        .get("question")
        .ok_or(QuestionError::MissingField("question"))?;
    let options_value = object
        .get("options")
        .ok_or(QuestionError::MissingField("options"))?;
    let answer_value = object
        .get("correct_answer")
        .ok_or(QuestionError::MissingField("correct_answer"))?;

    let text = coerce_scalar(text_value).ok_or(QuestionError::NonScalarField("question"))?;

    let raw_options = options_value
        .as_array()
        .ok_or(QuestionError::OptionsNotAnArray)?;
    if raw_options.len() != OPTIONS_PER_QUESTION {
        return Err(QuestionError::WrongOptionCount(raw_options.len()));
    }

    let mut options = Vec::with_capacity(OPTIONS_PER_QUESTION);
    for option in raw_options {
        options.push(coerce_scalar(option).ok_or(QuestionError::NonScalarField("options"))?);
    }

    let unique: HashSet<&str> = options.iter().map(String::as_str).collect();
    if unique.len() != options.len() {
        return Err(QuestionError::DuplicateOptions);
    }

    let correct_answer =
        coerce_scalar(answer_value).ok_or(QuestionError::NonScalarField("correct_answer"))?;

    // Exact, case-sensitive match against the normalized options.
    if !options.contains(&correct_answer) {
        return Err(QuestionError::CorrectAnswerNotAnOption);
    }

    Ok(Question {
        text,
        options,
        correct_answer,
    })
}

/// Normalizes a JSON scalar to its string form. Arrays, objects and null
/// have no sensible string rendering and are rejected by the caller.
fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
