/// Storage-specific errors
use thiserror::Error;

/// Errors raised while opening the database, before any domain operation runs
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for audioshare_core::AudioShareError {
    fn from(err: StorageError) -> Self {
        audioshare_core::AudioShareError::database(err.to_string())
    }
}

/// Which constraint, if any, a failed statement violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

pub(crate) fn violation(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if db_err.is_unique_violation() {
        Some(Violation::Unique)
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey)
    } else {
        None
    }
}
