//! Random play: serve quizzes the session has not yet answered correctly and
//! keep a running score until the first wrong answer or until none are left.

use serde::{Deserialize, Serialize};

use crate::db::models::Quiz;
use crate::repositories::quizzes::QuizStore;
use crate::repositories::StoreResult;
use crate::services::answers::answers_match;
use crate::services::randomness::RandomSource;

/// Ids answered correctly in the current run, in answer order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct RandomPlay {
    answered: Vec<i64>,
}

impl RandomPlay {
    pub(crate) fn answered(&self) -> &[i64] {
        &self.answered
    }

    pub(crate) fn score(&self) -> usize {
        self.answered.len()
    }

    /// Append `quiz_id` unless already present. Returns the new score.
    pub(crate) fn record_correct(&mut self, quiz_id: i64) -> usize {
        if !self.answered.contains(&quiz_id) {
            self.answered.push(quiz_id);
        }
        self.score()
    }

    /// Clear the run. Returns the score reached before clearing.
    pub(crate) fn reset(&mut self) -> usize {
        let score = self.score();
        self.answered.clear();
        score
    }
}

#[derive(Debug)]
pub(crate) enum RandomPick {
    Next { quiz: Quiz, score: usize },
    Exhausted { score: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RandomOutcome {
    pub(crate) result: bool,
    pub(crate) score: usize,
}

/// Choose uniformly among the quizzes not yet answered in `play`.
///
/// When nothing is left the run is reset and the final score returned.
pub(crate) async fn pick_next(
    store: &dyn QuizStore,
    random: &dyn RandomSource,
    play: &mut RandomPlay,
) -> StoreResult<RandomPick> {
    let count = store.count_excluding(play.answered()).await?;

    if count > 0 {
        let offset = random.pick(count as u64) as i64;
        if let Some(quiz) = store.nth_excluding(play.answered(), offset).await? {
            return Ok(RandomPick::Next { quiz, score: play.score() });
        }

        // Rows deleted between the count and the fetch end the run like exhaustion.
        tracing::warn!(count, offset, "random quiz disappeared before it could be fetched");
    }

    let score = play.reset();
    Ok(RandomPick::Exhausted { score })
}

/// Grade an answer in random mode. A wrong answer ends the run.
pub(crate) fn grade(play: &mut RandomPlay, quiz: &Quiz, answer: &str) -> RandomOutcome {
    if answers_match(answer, &quiz.answer) {
        RandomOutcome { result: true, score: play.record_correct(quiz.id) }
    } else {
        RandomOutcome { result: false, score: play.reset() }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::services::randomness::SeededRandom;
    use crate::test_support::{MemoryQuizStore, ScriptedRandom};

    async fn two_quiz_store() -> MemoryQuizStore {
        MemoryQuizStore::with_quizzes(&[("2+2", "4"), ("3+3", "6")]).await
    }

    #[test]
    fn record_correct_ignores_duplicates() {
        let mut play = RandomPlay::default();
        assert_eq!(play.record_correct(1), 1);
        assert_eq!(play.record_correct(1), 1);
        assert_eq!(play.record_correct(2), 2);
        assert_eq!(play.answered(), &[1, 2]);
    }

    #[test]
    fn reset_reports_previous_score() {
        let mut play = RandomPlay::default();
        play.record_correct(5);
        play.record_correct(9);

        assert_eq!(play.reset(), 2);
        assert_eq!(play.score(), 0);
    }

    #[tokio::test]
    async fn walkthrough_two_quizzes() {
        let store = two_quiz_store().await;
        let random = ScriptedRandom::new([0, 0]);
        let mut play = RandomPlay::default();

        let RandomPick::Next { quiz, score } =
            pick_next(&store, &random, &mut play).await.expect("pick")
        else {
            panic!("expected a quiz");
        };
        assert_eq!((quiz.id, score), (1, 0));

        let outcome = grade(&mut play, &quiz, "4");
        assert_eq!(outcome, RandomOutcome { result: true, score: 1 });
        assert_eq!(play.answered(), &[1]);

        let RandomPick::Next { quiz, score } =
            pick_next(&store, &random, &mut play).await.expect("pick")
        else {
            panic!("expected a quiz");
        };
        assert_eq!((quiz.id, score), (2, 1));
        assert_eq!(random.requested(), vec![2, 1]);

        let outcome = grade(&mut play, &quiz, "wrong");
        assert_eq!(outcome, RandomOutcome { result: false, score: 1 });
        assert!(play.answered().is_empty());
    }

    #[tokio::test]
    async fn never_reoffers_answered_quizzes() {
        let store = MemoryQuizStore::with_quizzes(&[
            ("Capital of Italy", "Rome"),
            ("Capital of Portugal", "Lisbon"),
            ("Capital of Spain", "Madrid"),
            ("Capital of France", "Paris"),
            ("Capital of Greece", "Athens"),
        ])
        .await;
        let random = SeededRandom::new(11);
        let mut play = RandomPlay::default();
        let mut offered = HashSet::new();

        loop {
            match pick_next(&store, &random, &mut play).await.expect("pick") {
                RandomPick::Next { quiz, .. } => {
                    assert!(offered.insert(quiz.id), "quiz {} offered twice", quiz.id);
                    grade(&mut play, &quiz, &quiz.answer.clone());
                }
                RandomPick::Exhausted { score } => {
                    assert_eq!(score, 5);
                    break;
                }
            }
        }

        assert_eq!(offered.len(), 5);
        assert!(play.answered().is_empty());
    }

    #[tokio::test]
    async fn empty_store_is_exhausted_immediately() {
        let store = MemoryQuizStore::default();
        let random = ScriptedRandom::new([]);
        let mut play = RandomPlay::default();

        let pick = pick_next(&store, &random, &mut play).await.expect("pick");

        assert!(matches!(pick, RandomPick::Exhausted { score: 0 }));
        assert!(random.requested().is_empty());
    }

    #[tokio::test]
    async fn deleted_ids_in_session_do_not_block_remaining_quizzes() {
        let store = two_quiz_store().await;
        let random = ScriptedRandom::new([0]);
        let mut play = RandomPlay::default();
        play.record_correct(99);

        let pick = pick_next(&store, &random, &mut play).await.expect("pick");

        assert!(matches!(pick, RandomPick::Next { score: 1, .. }));
        assert_eq!(random.requested(), vec![2]);
    }
}
