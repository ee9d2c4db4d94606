//! AudioShare Storage
//!
//! Multi-user `SQLite` database layer for AudioShare.
//!
//! This crate persists users, refresh tokens, audio metadata and share
//! edges, and implements the capability traits from `audioshare-core` on top
//! of them.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries and logic
//! - **Single Statements**: Ownership checks live in the WHERE clause of the
//!   write itself, so concurrent requests cannot race between check and write
//! - **Constraint Mapping**: Unique and foreign key violations become domain
//!   errors (`DuplicateUser`, `ShareExists`, `ShareTargetNotFound`)
//!
//! # Example
//!
//! ```rust,no_run
//! use audioshare_storage::{LocalStorageContext, create_pool, run_migrations};
//! use audioshare_core::{CredentialStore, CreateUser};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://audioshare.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! let _id = storage
//!     .create_user(CreateUser {
//!         name: "Alice".into(),
//!         username: "alice".into(),
//!         password: "hunter2".into(),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod audio;
pub mod shares;
pub mod tokens;
pub mod users;

pub use context::LocalStorageContext;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://audioshare.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "creating sqlite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("sqlite pool created");

    Ok(pool)
}

/// Create a pool and bring its schema up to date
pub async fn connect(database_url: &str) -> Result<SqlitePool, StorageError> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(pool)
}
