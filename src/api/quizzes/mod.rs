mod handlers;
mod random;

use axum::{routing::get, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index).post(handlers::create))
        .route("/new", get(handlers::new_quiz))
        .route("/randomplay", get(random::random_play))
        .route(
            "/:quiz_id",
            get(handlers::show).put(handlers::update).delete(handlers::destroy),
        )
        .route("/:quiz_id/edit", get(handlers::edit))
        .route("/:quiz_id/play", get(handlers::play))
        .route("/:quiz_id/check", get(handlers::check))
        .route("/:quiz_id/randomcheck", get(random::random_check))
}
