use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_SUBMISSIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS submissions (
        id            UUID PRIMARY KEY,
        first_name    TEXT NOT NULL,
        last_name     TEXT NOT NULL,
        age           INTEGER NOT NULL,
        gender        TEXT NOT NULL,
        phone_number  TEXT NOT NULL,
        email         TEXT NOT NULL,
        resume        TEXT NOT NULL DEFAULT '',
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `submissions` table when it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_SUBMISSIONS_TABLE)
        .execute(pool)
        .await
        .context("failed to create submissions table")?;
    Ok(())
}
