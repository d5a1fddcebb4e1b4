use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::db::models::Quiz;

/// The quiz named by the `:quiz_id` path segment, loaded before the handler runs.
pub(crate) struct LoadedQuiz(pub(crate) Quiz);

#[async_trait]
impl FromRequestParts<AppState> for LoadedQuiz {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to read quiz id"))?;

        let not_found = || ApiError::NotFound(format!("There is no quiz with id={raw_id}"));

        let Ok(quiz_id) = raw_id.parse::<i64>() else {
            return Err(not_found());
        };

        let quiz = state
            .quizzes()
            .find(quiz_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load quiz"))?;

        quiz.map(LoadedQuiz).ok_or_else(not_found)
    }
}
