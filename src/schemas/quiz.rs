use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::time::format_primitive;
use crate::db::models::Quiz;
use crate::repositories::quizzes::QuizFields;

/// Field order used when reporting validation failures.
const FORM_FIELDS: [&str; 2] = ["question", "answer"];

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub(crate) struct QuizForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Question must not be empty."))]
    pub(crate) question: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Answer must not be empty."))]
    pub(crate) answer: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

impl QuizForm {
    pub(crate) fn into_fields(self) -> QuizFields {
        QuizFields { question: self.question, answer: self.answer }
    }
}

/// Flatten validation failures into user-facing messages, question first.
pub(crate) fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let by_field = errors.field_errors();
    FORM_FIELDS
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errors| (*field, errors)))
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnswerQuery {
    #[serde(default)]
    pub(crate) answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuizResponse {
    pub(crate) id: i64,
    pub(crate) question: String,
    pub(crate) answer: String,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl QuizResponse {
    pub(crate) fn from_db(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            question: quiz.question,
            answer: quiz.answer,
            created_at: format_primitive(quiz.created_at),
            updated_at: format_primitive(quiz.updated_at),
        }
    }
}

/// What a player sees: the question without its answer.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuizPrompt {
    pub(crate) id: i64,
    pub(crate) question: String,
}

impl From<&Quiz> for QuizPrompt {
    fn from(quiz: &Quiz) -> Self {
        Self { id: quiz.id, question: quiz.question.clone() }
    }
}

/// Form contents for the new/edit views, possibly rejected input.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuizDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<i64>,
    pub(crate) question: String,
    pub(crate) answer: String,
}

impl QuizDraft {
    pub(crate) fn blank() -> Self {
        Self { id: None, question: String::new(), answer: String::new() }
    }

    pub(crate) fn from_form(id: Option<i64>, form: &QuizForm) -> Self {
        Self { id, question: form.question.clone(), answer: form.answer.clone() }
    }
}

impl From<&Quiz> for QuizDraft {
    fn from(quiz: &Quiz) -> Self {
        Self { id: Some(quiz.id), question: quiz.question.clone(), answer: quiz.answer.clone() }
    }
}
