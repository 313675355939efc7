//! Storage layer
//!
//! Two interchangeable backends: PostgreSQL (durable) and an in-process
//! fallback. The variant is chosen once at startup and never switches
//! afterwards.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Point-in-time view of the counters.
///
/// `emails` is only populated by the in-memory store; the database variant
/// recovers counts but does not enumerate signup rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub page_views: u64,
    pub clicks: u64,
    pub signups: u64,
    pub emails: Option<Vec<String>>,
}

/// The active storage backend, fixed at startup.
pub enum Storage {
    Postgres(Database),
    Memory(MemoryStore),
}

impl Storage {
    pub async fn record_page_view(&self) -> Result<(), StorageError> {
        match self {
            Storage::Postgres(db) => db.record_page_view().await,
            Storage::Memory(mem) => {
                mem.record_page_view();
                Ok(())
            }
        }
    }

    pub async fn record_click(&self) -> Result<(), StorageError> {
        match self {
            Storage::Postgres(db) => db.record_click().await,
            Storage::Memory(mem) => {
                mem.record_click();
                Ok(())
            }
        }
    }

    pub async fn record_signup(&self, email: &str) -> Result<(), StorageError> {
        match self {
            Storage::Postgres(db) => db.record_signup(email).await,
            Storage::Memory(mem) => {
                mem.record_signup(email);
                Ok(())
            }
        }
    }

    pub async fn click_count(&self) -> Result<u64, StorageError> {
        match self {
            Storage::Postgres(db) => db.click_count().await,
            Storage::Memory(mem) => Ok(mem.click_count()),
        }
    }

    pub async fn metrics(&self) -> Result<MetricsSnapshot, StorageError> {
        match self {
            Storage::Postgres(db) => db.metrics().await,
            Storage::Memory(mem) => Ok(mem.metrics()),
        }
    }

    /// Whether counters survive a process restart.
    pub fn is_durable(&self) -> bool {
        matches!(self, Storage::Postgres(_))
    }
}
