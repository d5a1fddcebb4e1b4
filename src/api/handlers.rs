use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::BTreeMap;

use crate::core::metrics;
use crate::core::state::AppState;
use crate::repositories::sessions::SessionHealth;
use crate::schemas::{HealthResponse, HealthStatus, RootResponse};

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let api = state.settings().api();
    Json(RootResponse {
        message: api.project_name.clone(),
        version: api.version.clone(),
        quizzes_url: "/quizzes",
        random_play_url: "/quizzes/randomplay",
    })
}

pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut status = HealthStatus::Healthy;
    let mut components = BTreeMap::new();

    let sessions = state.sessions();
    let backend = sessions.backend();
    match sessions.health().await {
        SessionHealth::Healthy => {
            components.insert("sessions", format!("healthy ({backend})"));
        }
        SessionHealth::Degraded(reason) => {
            components.insert("sessions", format!("{reason} ({backend})"));
            status = status.max(HealthStatus::Degraded);
        }
    }

    match state.quizzes().ping().await {
        Ok(()) => {
            components.insert("database", "healthy".to_string());
        }
        Err(err) => {
            tracing::warn!(error = %err, "database health check failed");
            components.insert("database", format!("unhealthy: {err}"));
            status = status.max(HealthStatus::Unhealthy);
        }
    }

    Json(HealthResponse { service: "quiz-server", status, components })
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
