/// Sharing service - business rules in front of the share registry
use audioshare_core::{
    types::{AudioId, Page, SharedCountsPage, UserId},
    AudioShareError, Result, ShareRegistry,
};
use std::sync::Arc;

pub struct SharingService {
    registry: Arc<dyn ShareRegistry>,
}

impl SharingService {
    pub fn new(registry: Arc<dyn ShareRegistry>) -> Self {
        Self { registry }
    }

    /// Grant `target` read access; sharing with oneself never reaches storage
    pub async fn share(&self, owner: UserId, audio_id: AudioId, target: UserId) -> Result<()> {
        if owner == target {
            return Err(AudioShareError::SelfShare);
        }
        self.registry.share(owner, audio_id, target).await
    }

    /// Revoke `target`'s read access
    pub async fn unshare(&self, owner: UserId, audio_id: AudioId, target: UserId) -> Result<()> {
        if owner == target {
            return Err(AudioShareError::SelfShare);
        }
        self.registry.unshare(owner, audio_id, target).await
    }

    pub async fn shared_counts(&self, page: Page) -> Result<SharedCountsPage> {
        self.registry.shared_counts(page).await
    }
}
