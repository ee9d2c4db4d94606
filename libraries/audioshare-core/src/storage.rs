//! Capability traits implemented by the storage layer
//!
//! Each trait covers one concern so that consumers depend only on what they
//! use: the token issuer sees refresh tokens, the share service sees shares,
//! and so on.

use crate::error::Result;
use crate::types::{
    AudioId, AudioListPage, AudioListQuery, BlobId, CreateUser, DownloadAudio, Page,
    SharedCountsPage, UpdateAudio, User, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Users and their password hashes
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create a user, hashing the password before it is stored.
    ///
    /// Fails with `DuplicateUser` when the username is taken.
    async fn create_user(&self, user: CreateUser) -> Result<UserId>;

    /// Look up a user by username and verify the password.
    ///
    /// Fails with `InvalidCredentials` for an unknown username or a wrong
    /// password alike.
    async fn get_user(&self, username: &str, password: &str) -> Result<User>;

    /// All users ordered by display name
    async fn list_users(&self) -> Result<Vec<User>>;
}

/// One rotating refresh token per user
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Store `token` for the user, replacing any previous token
    async fn set_refresh_token(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Swap a live token for `new_token` and return its owner.
    ///
    /// Fails with `InvalidRefreshToken` when `old_token` is unknown, was
    /// already rotated, or has expired.
    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<UserId>;
}

/// Audio metadata rows
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait AudioCatalog: Send + Sync {
    /// Register an uploaded blob with a blank title and zero duration
    async fn upload(&self, user_id: UserId, blob_id: BlobId) -> Result<AudioId>;

    /// Update title and/or duration of an audio the user owns.
    ///
    /// Fails with `NotOwner` when nothing matched, whether the audio is
    /// missing or belongs to someone else.
    async fn update_description(
        &self,
        user_id: UserId,
        audio_id: AudioId,
        update: UpdateAudio,
    ) -> Result<()>;

    /// Title and blob of an audio the user owns or has been shared.
    ///
    /// Fails with `AudioNotFound` otherwise.
    async fn download(&self, user_id: UserId, audio_id: AudioId) -> Result<DownloadAudio>;

    /// Owned and shared audio, windowed and ordered per `query`
    async fn list(&self, user_id: UserId, query: AudioListQuery) -> Result<AudioListPage>;
}

/// Share edges between audio and non-owner users
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ShareRegistry: Send + Sync {
    /// Grant `target` access to an audio owned by `owner`
    async fn share(&self, owner: UserId, audio_id: AudioId, target: UserId) -> Result<()>;

    /// Revoke `target`'s access to an audio owned by `owner`
    async fn unshare(&self, owner: UserId, audio_id: AudioId, target: UserId) -> Result<()>;

    /// Number of shared audio per target user, ordered by user name
    async fn shared_counts(&self, page: Page) -> Result<SharedCountsPage>;
}
