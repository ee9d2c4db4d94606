//! AudioShare Core
//!
//! Domain types, capability traits, and error handling shared by the
//! AudioShare storage layer and server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `AudioRecord`, `SharedCount`, etc.
//! - **Capability Traits**: `CredentialStore`, `RefreshTokenStore`,
//!   `AudioCatalog`, `ShareRegistry`
//! - **Error Handling**: the closed `AudioShareError` set and `Result` alias
//!
//! Each trait is narrow on purpose: the server hands every handler only the
//! collaborators it needs.
//!
//! # Example
//!
//! ```rust
//! use audioshare_core::types::{OrderType, UpdateAudio};
//!
//! let order: OrderType = "alphabet".parse().unwrap();
//! assert_eq!(order, OrderType::Alphabet);
//!
//! let update = UpdateAudio { title: None, duration: None };
//! assert!(update.validate().is_err());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{AudioShareError, Result};
pub use storage::{AudioCatalog, CredentialStore, RefreshTokenStore, ShareRegistry};

pub use types::{
    AudioId, AudioListPage, AudioListQuery, AudioRecord, BlobId, CreateUser, DownloadAudio,
    OrderType, Page, SharedCount, SharedCountsPage, SharedTo, UpdateAudio, User, UserId,
};
