// src/quiz/scoring.rs

use std::fmt;

use crate::models::question::{QuestionResult, QuestionSet, ScoreOutcome};

/// The submission carried a different number of answers than the quiz has
/// questions. Rejected before any comparison runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub expected: usize,
    pub got: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected {} answers, got {}", self.expected, self.got)
    }
}

impl std::error::Error for LengthMismatch {}

/// Scores a submission against its question set.
///
/// Each answer is compared to the recorded correct answer at the same
/// index by exact string equality, no case folding or trimming. One point
/// per match. Results preserve question order. Pure and deterministic.
pub fn score(set: &QuestionSet, answers: &[String]) -> Result<ScoreOutcome, LengthMismatch> {
    if answers.len() != set.questions.len() {
        return Err(LengthMismatch {
            expected: set.questions.len(),
            got: answers.len(),
        });
    }

    let mut score = 0;
    let mut results = Vec::with_capacity(set.questions.len());

    for (question, selected) in set.questions.iter().zip(answers) {
        let is_correct = *selected == question.correct_answer;
        if is_correct {
            score += 1;
        }
        results.push(QuestionResult {
            question_text: question.text.clone(),
            selected_answer: selected.clone(),
            correct_answer: question.correct_answer.clone(),
            is_correct,
        });
    }

    Ok(ScoreOutcome { score, results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Question;

    fn sample_set() -> QuestionSet {
        QuestionSet {
            topic: "Example Show".to_string(),
            questions: (1..=10)
                .map(|i| Question {
                    text: format!("Question {i}?"),
                    options: vec![
                        format!("A{i}"),
                        format!("B{i}"),
                        format!("C{i}"),
                        format!("D{i}"),
                    ],
                    correct_answer: format!("A{i}"),
                })
                .collect(),
        }
    }

    fn correct_answers() -> Vec<String> {
        (1..=10).map(|i| format!("A{i}")).collect()
    }

    #[test]
    fn all_correct_scores_ten() {
        let outcome = score(&sample_set(), &correct_answers()).unwrap();

        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.results.len(), 10);
        assert!(outcome.results.iter().all(|r| r.is_correct));
    }

    #[test]
    fn all_wrong_scores_zero() {
        let answers: Vec<String> = (1..=10).map(|i| format!("D{i}")).collect();
        let outcome = score(&sample_set(), &answers).unwrap();

        assert_eq!(outcome.score, 0);
        assert!(outcome.results.iter().all(|r| !r.is_correct));
    }

    #[test]
    fn partial_match_counts_only_exact_hits() {
        let mut answers = correct_answers();
        answers[3] = "B4".to_string();
        answers[7] = "a8".to_string(); // case matters

        let outcome = score(&sample_set(), &answers).unwrap();
        assert_eq!(outcome.score, 8);
        assert!(!outcome.results[3].is_correct);
        assert!(!outcome.results[7].is_correct);
    }

    #[test]
    fn results_preserve_question_order() {
        let outcome = score(&sample_set(), &correct_answers()).unwrap();

        for (i, result) in outcome.results.iter().enumerate() {
            assert_eq!(result.question_text, format!("Question {}?", i + 1));
            assert_eq!(result.selected_answer, format!("A{}", i + 1));
            assert_eq!(result.correct_answer, format!("A{}", i + 1));
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let short: Vec<String> = (1..=9).map(|i| format!("A{i}")).collect();
        assert_eq!(
            score(&sample_set(), &short),
            Err(LengthMismatch { expected: 10, got: 9 })
        );

        let long: Vec<String> = (1..=11).map(|i| format!("A{i}")).collect();
        assert_eq!(
            score(&sample_set(), &long),
            Err(LengthMismatch { expected: 10, got: 11 })
        );
    }

    #[test]
    fn scoring_is_deterministic() {
        let set = sample_set();
        let answers = correct_answers();

        let first = score(&set, &answers).unwrap();
        let second = score(&set, &answers).unwrap();
        assert_eq!(first, second);
    }
}
