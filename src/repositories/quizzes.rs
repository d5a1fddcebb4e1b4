use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::time::primitive_now_utc;
use crate::db::models::Quiz;
use crate::repositories::StoreResult;

pub(crate) const COLUMNS: &str = "id, question, answer, created_at, updated_at";

/// The two user-editable quiz fields. Everything else belongs to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuizFields {
    pub(crate) question: String,
    pub(crate) answer: String,
}

#[async_trait]
pub(crate) trait QuizStore: Send + Sync {
    async fn find(&self, id: i64) -> StoreResult<Option<Quiz>>;

    /// All quizzes ordered by id.
    async fn list(&self) -> StoreResult<Vec<Quiz>>;

    async fn create(&self, fields: QuizFields) -> StoreResult<Quiz>;

    /// Overwrite question and answer only. Returns `None` when the row is gone.
    async fn update(&self, id: i64, fields: QuizFields) -> StoreResult<Option<Quiz>>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;

    async fn count_excluding(&self, excluded: &[i64]) -> StoreResult<i64>;

    /// Row at `offset` among quizzes not in `excluded`, ordered by id.
    async fn nth_excluding(&self, excluded: &[i64], offset: i64) -> StoreResult<Option<Quiz>>;

    async fn ping(&self) -> StoreResult<()>;
}

#[derive(Clone)]
pub(crate) struct PgQuizStore {
    pool: PgPool,
}

impl PgQuizStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizStore for PgQuizStore {
    async fn find(&self, id: i64) -> StoreResult<Option<Quiz>> {
        let quiz =
            sqlx::query_as::<_, Quiz>(&format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(quiz)
    }

    async fn list(&self) -> StoreResult<Vec<Quiz>> {
        let quizzes =
            sqlx::query_as::<_, Quiz>(&format!("SELECT {COLUMNS} FROM quizzes ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(quizzes)
    }

    async fn create(&self, fields: QuizFields) -> StoreResult<Quiz> {
        let now = primitive_now_utc();
        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "INSERT INTO quizzes (question, answer, created_at, updated_at)
             VALUES ($1, $2, $3, $3)
             RETURNING {COLUMNS}"
        ))
        .bind(fields.question)
        .bind(fields.answer)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(quiz)
    }

    async fn update(&self, id: i64, fields: QuizFields) -> StoreResult<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "UPDATE quizzes SET question = $1, answer = $2, updated_at = $3
             WHERE id = $4
             RETURNING {COLUMNS}"
        ))
        .bind(fields.question)
        .bind(fields.answer)
        .bind(primitive_now_utc())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quiz)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_excluding(&self, excluded: &[i64]) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM quizzes WHERE NOT (id = ANY($1))")
                .bind(excluded)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn nth_excluding(&self, excluded: &[i64], offset: i64) -> StoreResult<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE NOT (id = ANY($1))
             ORDER BY id
             OFFSET $2 LIMIT 1"
        ))
        .bind(excluded)
        .bind(offset)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quiz)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
