// src/quiz/registry.rs

use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::models::question::QuestionSet;

struct StoredQuiz {
    set: QuestionSet,
    stored_at: Instant,
}

/// In-process store of generated quizzes awaiting submission.
///
/// Records are write-once: `create` is the only insert path and nothing
/// ever mutates a stored set. Entries expire after `ttl`; expired entries
/// are dropped lazily on lookup and swept on every insert, so the map is
/// bounded by live traffic rather than process lifetime.
///
/// Concurrent `create`/`get` from multiple request tasks is safe, and
/// operations on the same quiz id are linearizable through the backing
/// map's per-shard locks.
pub struct QuizRegistry {
    quizzes: DashMap<String, StoredQuiz>,
    ttl: Duration,
}

impl QuizRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            quizzes: DashMap::new(),
            ttl,
        }
    }

    /// Stores a question set under a fresh opaque identifier and returns
    /// the identifier. A random 128-bit UUID makes collisions negligible;
    /// they are not checked for.
    pub fn create(&self, set: QuestionSet) -> String {
        self.sweep_expired();

        let quiz_id = Uuid::new_v4().to_string();
        self.quizzes.insert(
            quiz_id.clone(),
            StoredQuiz {
                set,
                stored_at: Instant::now(),
            },
        );
        quiz_id
    }

    /// Looks up a stored quiz. Returns `None` for identifiers that were
    /// never issued or whose entry has expired.
    pub fn get(&self, quiz_id: &str) -> Option<QuestionSet> {
        let expired = match self.quizzes.get(quiz_id) {
            Some(entry) => {
                if entry.stored_at.elapsed() < self.ttl {
                    return Some(entry.set.clone());
                }
                // Drop the shard guard before removing.
                true
            }
            None => false,
        };

        if expired {
            self.quizzes.remove(quiz_id);
        }
        None
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    fn sweep_expired(&self) {
        let ttl = self.ttl;
        self.quizzes.retain(|_, quiz| quiz.stored_at.elapsed() < ttl);
    }
}
