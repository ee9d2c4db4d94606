//! AudioShare Server Library
//!
//! Multi-user AAC sharing server: sign-up and token sessions, uploads,
//! descriptions, sharing and downloads.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, file_storage::FileStorage, sharing::SharingService};
pub use state::AppState;
