/// Server services
pub mod auth;
pub mod file_storage;
pub mod sharing;

pub use auth::AuthService;
pub use file_storage::FileStorage;
pub use sharing::SharingService;
