use axum::extract::{Query, State};
use axum::response::Response;
use axum::Form;
use validator::{Validate, ValidationErrors};

use crate::api::errors::ApiError;
use crate::api::guards::LoadedQuiz;
use crate::api::session::CurrentSession;
use crate::api::views::View;
use crate::core::metrics::{self, AnswerMode};
use crate::core::state::AppState;
use crate::schemas::quiz::{
    validation_messages, AnswerQuery, QuizDraft, QuizForm, QuizPrompt, QuizResponse,
};
use crate::schemas::session::FlashKind;
use crate::services::answers::answers_match;

pub(super) async fn index(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, ApiError> {
    let quizzes = state
        .quizzes()
        .list()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list quizzes"))?;

    let quizzes = quizzes.into_iter().map(QuizResponse::from_db).collect::<Vec<_>>();
    session.render(View::new("quizzes/index").with("quizzes", quizzes)).await
}

pub(super) async fn show(
    LoadedQuiz(quiz): LoadedQuiz,
    session: CurrentSession,
) -> Result<Response, ApiError> {
    session.render(View::new("quizzes/show").with("quiz", QuizResponse::from_db(quiz))).await
}

pub(super) async fn new_quiz(session: CurrentSession) -> Result<Response, ApiError> {
    session.render(View::new("quizzes/new").with("quiz", QuizDraft::blank())).await
}

pub(super) async fn create(
    State(state): State<AppState>,
    mut session: CurrentSession,
    Form(form): Form<QuizForm>,
) -> Result<Response, ApiError> {
    if let Err(errors) = form.validate() {
        let draft = QuizDraft::from_form(None, &form);
        return render_invalid(session, "quizzes/new", draft, &errors).await;
    }

    match state.quizzes().create(form.into_fields()).await {
        Ok(quiz) => {
            tracing::info!(quiz_id = quiz.id, action = "create", "quiz saved");
            session.flash(FlashKind::Success, "Quiz created successfully.");
            session.redirect(&format!("/quizzes/{}", quiz.id)).await
        }
        Err(err) => {
            let message = format!("Error creating a new Quiz: {err}");
            Err(session.fail(message, ApiError::internal(err, "Failed to create quiz")).await)
        }
    }
}

pub(super) async fn edit(
    LoadedQuiz(quiz): LoadedQuiz,
    session: CurrentSession,
) -> Result<Response, ApiError> {
    session.render(View::new("quizzes/edit").with("quiz", QuizDraft::from(&quiz))).await
}

pub(super) async fn update(
    State(state): State<AppState>,
    LoadedQuiz(quiz): LoadedQuiz,
    mut session: CurrentSession,
    Form(form): Form<QuizForm>,
) -> Result<Response, ApiError> {
    if let Err(errors) = form.validate() {
        let draft = QuizDraft::from_form(Some(quiz.id), &form);
        return render_invalid(session, "quizzes/edit", draft, &errors).await;
    }

    match state.quizzes().update(quiz.id, form.into_fields()).await {
        Ok(Some(updated)) => {
            tracing::info!(quiz_id = updated.id, action = "update", "quiz saved");
            session.flash(FlashKind::Success, "Quiz edited successfully.");
            session.redirect(&format!("/quizzes/{}", updated.id)).await
        }
        Ok(None) => Err(ApiError::NotFound(format!("There is no quiz with id={}", quiz.id))),
        Err(err) => {
            let message = format!("Error editing the Quiz: {err}");
            Err(session.fail(message, ApiError::internal(err, "Failed to update quiz")).await)
        }
    }
}

pub(super) async fn destroy(
    State(state): State<AppState>,
    LoadedQuiz(quiz): LoadedQuiz,
    mut session: CurrentSession,
) -> Result<Response, ApiError> {
    match state.quizzes().delete(quiz.id).await {
        Ok(removed) => {
            if removed {
                tracing::info!(quiz_id = quiz.id, action = "delete", "quiz deleted");
            } else {
                tracing::warn!(quiz_id = quiz.id, action = "delete", "quiz was already gone");
            }
            session.flash(FlashKind::Success, "Quiz deleted successfully.");
            session.redirect("/quizzes").await
        }
        Err(err) => {
            let message = format!("Error deleting the Quiz: {err}");
            Err(session.fail(message, ApiError::internal(err, "Failed to delete quiz")).await)
        }
    }
}

pub(super) async fn play(
    LoadedQuiz(quiz): LoadedQuiz,
    session: CurrentSession,
    Query(query): Query<AnswerQuery>,
) -> Result<Response, ApiError> {
    let view = View::new("quizzes/play")
        .with("quiz", QuizPrompt::from(&quiz))
        .with("answer", query.answer);
    session.render(view).await
}

pub(super) async fn check(
    LoadedQuiz(quiz): LoadedQuiz,
    session: CurrentSession,
    Query(query): Query<AnswerQuery>,
) -> Result<Response, ApiError> {
    let result = answers_match(&query.answer, &quiz.answer);
    metrics::record_answer(AnswerMode::Single, result);

    let view = View::new("quizzes/result")
        .with("quiz", QuizResponse::from_db(quiz))
        .with("result", result)
        .with("answer", query.answer);
    session.render(view).await
}

async fn render_invalid(
    mut session: CurrentSession,
    template: &'static str,
    draft: QuizDraft,
    errors: &ValidationErrors,
) -> Result<Response, ApiError> {
    session.flash(FlashKind::Error, "There are errors in the form:");
    for message in validation_messages(errors) {
        session.flash(FlashKind::Error, message);
    }
    session.render(View::new(template).with("quiz", draft)).await
}
