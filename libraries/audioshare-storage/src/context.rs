use crate::{audio, shares, tokens, users};
use async_trait::async_trait;
use audioshare_core::{error::Result, storage::*, types::*};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
///
/// Implements every capability trait; the server hands out the same context
/// behind each trait object.
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor (tests use the minimum, 4)
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for LocalStorageContext {
    async fn create_user(&self, user: CreateUser) -> Result<UserId> {
        users::create(&self.pool, user, self.bcrypt_cost).await
    }

    async fn get_user(&self, username: &str, password: &str) -> Result<User> {
        users::get_by_credentials(&self.pool, username, password).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }
}

#[async_trait]
impl RefreshTokenStore for LocalStorageContext {
    async fn set_refresh_token(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        tokens::upsert(&self.pool, user_id, token, expires_at).await
    }

    async fn rotate_refresh_token(
        &self,
        old_token: &str,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<UserId> {
        tokens::rotate(&self.pool, old_token, new_token, expires_at).await
    }
}

#[async_trait]
impl AudioCatalog for LocalStorageContext {
    async fn upload(&self, user_id: UserId, blob_id: BlobId) -> Result<AudioId> {
        audio::create(&self.pool, user_id, blob_id).await
    }

    async fn update_description(
        &self,
        user_id: UserId,
        audio_id: AudioId,
        update: UpdateAudio,
    ) -> Result<()> {
        audio::update_description(&self.pool, user_id, audio_id, update).await
    }

    async fn download(&self, user_id: UserId, audio_id: AudioId) -> Result<DownloadAudio> {
        audio::get_for_download(&self.pool, user_id, audio_id).await
    }

    async fn list(&self, user_id: UserId, query: AudioListQuery) -> Result<AudioListPage> {
        audio::list(&self.pool, user_id, query).await
    }
}

#[async_trait]
impl ShareRegistry for LocalStorageContext {
    async fn share(&self, owner: UserId, audio_id: AudioId, target: UserId) -> Result<()> {
        shares::create(&self.pool, owner, audio_id, target).await
    }

    async fn unshare(&self, owner: UserId, audio_id: AudioId, target: UserId) -> Result<()> {
        shares::delete(&self.pool, owner, audio_id, target).await
    }

    async fn shared_counts(&self, page: Page) -> Result<SharedCountsPage> {
        shares::count_by_user(&self.pool, page).await
    }
}
