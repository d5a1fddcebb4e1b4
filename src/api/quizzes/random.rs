use axum::extract::{Query, State};
use axum::response::Response;

use crate::api::errors::ApiError;
use crate::api::guards::LoadedQuiz;
use crate::api::session::CurrentSession;
use crate::api::views::View;
use crate::core::metrics::{self, AnswerMode};
use crate::core::state::AppState;
use crate::schemas::quiz::{AnswerQuery, QuizPrompt};
use crate::services::random_play::{self, RandomPick};

pub(super) async fn random_play(
    State(state): State<AppState>,
    mut session: CurrentSession,
) -> Result<Response, ApiError> {
    let pick = random_play::pick_next(state.quizzes(), state.random(), session.random_play()).await;

    match pick {
        Ok(RandomPick::Next { quiz, score }) => {
            let view = View::new("quizzes/random_play")
                .with("quiz", QuizPrompt::from(&quiz))
                .with("score", score);
            session.render(view).await
        }
        Ok(RandomPick::Exhausted { score }) => {
            tracing::info!(score, "random play exhausted");
            session.render(View::new("quizzes/random_nomore").with("score", score)).await
        }
        Err(err) => {
            let message = format!("error getting a random Quiz: {err}");
            Err(session.fail(message, ApiError::internal(err, "Failed to pick random quiz")).await)
        }
    }
}

pub(super) async fn random_check(
    LoadedQuiz(quiz): LoadedQuiz,
    mut session: CurrentSession,
    Query(query): Query<AnswerQuery>,
) -> Result<Response, ApiError> {
    let outcome = random_play::grade(session.random_play(), &quiz, &query.answer);
    metrics::record_answer(AnswerMode::Random, outcome.result);
    tracing::debug!(
        quiz_id = quiz.id,
        result = outcome.result,
        score = outcome.score,
        "random answer graded"
    );

    let view = View::new("quizzes/random_result")
        .with("score", outcome.score)
        .with("result", outcome.result)
        .with("answer", query.answer);
    session.render(view).await
}
