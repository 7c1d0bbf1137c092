use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::submission::{NewSubmission, Submission};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("database connection is not available")]
    Unavailable,
}

/// Persistence seam for submissions. Inserts are single-row and atomic.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError>;

    /// Releases held connections. Called once after the server stops.
    async fn close(&self) {}
}

/// Postgres-backed store.
///
/// Holds no pool when the startup connection failed; every insert then
/// reports [`StoreError::Unavailable`] and no reconnect is attempted.
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: Option<PgPool>,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn disconnected() -> Self {
        Self { pool: None }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let pool = self.pool.as_ref().ok_or(StoreError::Unavailable)?;

        let row: Submission = sqlx::query_as(
            r#"
            INSERT INTO submissions
                (id, first_name, last_name, age, gender, phone_number, email, resume, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&submission.first_name)
        .bind(&submission.last_name)
        .bind(submission.age)
        .bind(&submission.gender)
        .bind(&submission.phone_number)
        .bind(&submission.email)
        .bind(&submission.resume)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("PostgreSQL connection pool closed");
        }
    }
}
