use std::sync::Arc;

use crate::core::config::Settings;
use crate::repositories::quizzes::QuizStore;
use crate::repositories::sessions::SessionStore;
use crate::services::randomness::RandomSource;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    quizzes: Arc<dyn QuizStore>,
    sessions: Arc<dyn SessionStore>,
    random: Arc<dyn RandomSource>,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        quizzes: Arc<dyn QuizStore>,
        sessions: Arc<dyn SessionStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, quizzes, sessions, random }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn quizzes(&self) -> &dyn QuizStore {
        self.inner.quizzes.as_ref()
    }

    pub(crate) fn sessions(&self) -> &dyn SessionStore {
        self.inner.sessions.as_ref()
    }

    pub(crate) fn random(&self) -> &dyn RandomSource {
        self.inner.random.as_ref()
    }
}
