use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::views::View;
use crate::core::state::AppState;
use crate::schemas::session::{FlashKind, SessionData};
use crate::services::random_play::RandomPlay;

/// Identifier of the caller's session, placed in request extensions by [`ensure_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionId(String);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Only well-formed UUIDs are accepted so arbitrary cookie values never become store keys.
    fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(|id| Self(id.to_string()))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware: reuse the session cookie when present, otherwise mint one.
pub(crate) async fn ensure_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let settings = state.settings().session();
    let existing =
        jar.get(&settings.cookie_name).and_then(|cookie| SessionId::parse(cookie.value()));

    let (jar, session_id) = match existing {
        Some(session_id) => (jar, session_id),
        None => {
            let session_id = SessionId::generate();
            let cookie = session_cookie(&settings.cookie_name, &session_id, settings.ttl_seconds);
            (jar.add(cookie), session_id)
        }
    };

    request.extensions_mut().insert(session_id);
    let response = next.run(request).await;
    (jar, response).into_response()
}

fn session_cookie(name: &str, session_id: &SessionId, ttl_seconds: u64) -> Cookie<'static> {
    let max_age = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
    Cookie::build((name.to_string(), session_id.0.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// The caller's session state, loaded for the duration of one request.
///
/// Writes are whole-session replacements, so two concurrent requests from the
/// same session race and the last one to finish wins.
pub(crate) struct CurrentSession {
    id: SessionId,
    data: SessionData,
    state: AppState,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .extensions
            .get::<SessionId>()
            .cloned()
            .ok_or_else(|| ApiError::internal("missing session id", "Session is not available"))?;

        let data = state
            .sessions()
            .load(id.as_str())
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load session"))?
            .unwrap_or_default();

        Ok(Self { id, data, state: state.clone() })
    }
}

impl CurrentSession {
    pub(crate) fn random_play(&mut self) -> &mut RandomPlay {
        &mut self.data.random_play
    }

    pub(crate) fn flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.data.push_flash(kind, message);
    }

    /// Render `view` with every pending flash message, then forget them.
    pub(crate) async fn render(mut self, view: View) -> Result<Response, ApiError> {
        let flash = self.data.take_flash();
        let response = view.render(flash)?;
        self.persist().await?;
        Ok(response)
    }

    /// Redirect, keeping pending flash messages for the next rendered view.
    pub(crate) async fn redirect(self, to: &str) -> Result<Response, ApiError> {
        self.persist().await?;
        Ok(Redirect::to(to).into_response())
    }

    /// Record `message` for the user and hand `error` on to the error handler.
    pub(crate) async fn fail(mut self, message: String, error: ApiError) -> ApiError {
        self.flash(FlashKind::Error, message);
        if let Err(err) = self.persist().await {
            tracing::warn!(error = ?err, "Failed to keep flash message for failed request");
        }
        error
    }

    async fn persist(&self) -> Result<(), ApiError> {
        self.state
            .sessions()
            .save(self.id.as_str(), &self.data)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to save session"))
    }
}
