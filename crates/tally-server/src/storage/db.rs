//! PostgreSQL storage layer

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use super::{MetricsSnapshot, StorageError};

pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Opens a pool and bootstraps the schema. Any failure here is reported
    /// to the caller, which falls back to the in-memory store for the rest
    /// of the process lifetime.
    pub async fn connect(database_url: &str, relaxed_tls: bool) -> Result<Self> {
        let mut options: PgConnectOptions = database_url
            .parse()
            .context("Invalid DATABASE_URL")?;
        if relaxed_tls {
            // Managed hosts often present certificates the local trust store
            // cannot validate; encrypt without CA validation.
            options = options.ssl_mode(PgSslMode::Require);
        }

        tracing::info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to PostgreSQL")?;

        Self::bootstrap(&pool)
            .await
            .context("Failed to bootstrap schema")?;

        tracing::info!("Database initialization complete");
        Ok(Self { pool })
    }

    /// Idempotent schema creation, safe to re-run on every startup.
    async fn bootstrap(pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pageviews (
                id SERIAL PRIMARY KEY,
                at TIMESTAMP DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clicks (
                id SERIAL PRIMARY KEY,
                at TIMESTAMP DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS signups (
                id SERIAL PRIMARY KEY,
                email TEXT NOT NULL,
                at TIMESTAMP DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn record_page_view(&self) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO pageviews DEFAULT VALUES")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn record_click(&self) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO clicks DEFAULT VALUES")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn record_signup(&self, email: &str) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO signups (email) VALUES ($1)")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn click_count(&self) -> Result<u64, StorageError> {
        self.count("SELECT COUNT(*) FROM clicks").await
    }

    /// Three independent count queries; no transaction, consistency is the
    /// database's concern.
    pub async fn metrics(&self) -> Result<MetricsSnapshot, StorageError> {
        let page_views = self.count("SELECT COUNT(*) FROM pageviews").await?;
        let clicks = self.count("SELECT COUNT(*) FROM clicks").await?;
        let signups = self.count("SELECT COUNT(*) FROM signups").await?;
        Ok(MetricsSnapshot {
            page_views,
            clicks,
            signups,
            emails: None,
        })
    }

    async fn count(&self, sql: &str) -> Result<u64, StorageError> {
        let n: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        Ok(n as u64)
    }
}
