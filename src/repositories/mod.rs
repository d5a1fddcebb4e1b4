pub(crate) mod quizzes;
pub(crate) mod sessions;

use thiserror::Error;

pub(crate) type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a quiz or session backend, whatever the engine behind it.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("session store error: {0}")]
    Session(#[from] redis::RedisError),
    #[error("malformed session payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
