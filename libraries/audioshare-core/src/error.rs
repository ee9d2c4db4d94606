/// Core error types for AudioShare
use thiserror::Error;

/// Result type alias using `AudioShareError`
pub type Result<T> = std::result::Result<T, AudioShareError>;

/// Every failure a storage or service operation can report.
///
/// The HTTP layer matches on these variants to pick a status code, so new
/// conditions get a new variant rather than a message string.
#[derive(Error, Debug)]
pub enum AudioShareError {
    /// Sign-up with a username that is already taken
    #[error("user exists")]
    DuplicateUser,

    /// No user matches the username and password pair
    #[error("user or password is incorrect")]
    InvalidCredentials,

    /// Refresh token unknown, already rotated, or expired
    #[error("refresh token is invalid or expired")]
    InvalidRefreshToken,

    /// Audio does not exist or the caller can neither own nor see it
    #[error("file not found or you haven't access")]
    AudioNotFound,

    /// Audio does not exist or the caller does not own it
    #[error("you are not owner or audio not exists")]
    NotOwner,

    /// The (audio, user) share edge already exists
    #[error("share exists")]
    ShareExists,

    /// The share target user does not exist
    #[error("user you share with not exists")]
    ShareTargetNotFound,

    /// Owner tried to share an audio with (or unshare it from) themselves
    #[error("can't share own audio with yourself")]
    SelfShare,

    /// Description update carried neither title nor duration
    #[error("update structure has no values")]
    EmptyUpdate,

    /// List ordering other than `owner` or `alphabet`
    #[error("unknown order type: {0}")]
    UnknownOrderType(String),

    /// Malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uploaded bytes do not start with an AAC frame sync word
    #[error("file is not Aac")]
    NotSupportedFormat,

    /// No blob stored under the given identifier
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    /// Password hashing or verification failed
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AudioShareError {
    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for errors caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::PasswordHash(_) | Self::Database(_) | Self::Io(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for AudioShareError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
