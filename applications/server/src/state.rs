/// Shared application state
use crate::services::{AuthService, FileStorage, SharingService};
use audioshare_core::{AudioCatalog, CredentialStore};
use audioshare_storage::LocalStorageContext;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Each collaborator is held behind the narrow interface its handlers use.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub auth_service: Arc<AuthService>,
    pub catalog: Arc<dyn AudioCatalog>,
    pub sharing: Arc<SharingService>,
    pub file_storage: Arc<FileStorage>,
}

impl AppState {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        auth_service: Arc<AuthService>,
        catalog: Arc<dyn AudioCatalog>,
        sharing: Arc<SharingService>,
        file_storage: Arc<FileStorage>,
    ) -> Self {
        Self {
            credentials,
            auth_service,
            catalog,
            sharing,
            file_storage,
        }
    }

    /// Wire every capability to one `SQLite` storage context
    pub fn with_storage(
        storage: LocalStorageContext,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
    ) -> Self {
        let storage = Arc::new(storage);
        Self::new(
            storage.clone(),
            auth_service,
            storage.clone(),
            Arc::new(SharingService::new(storage)),
            file_storage,
        )
    }
}
