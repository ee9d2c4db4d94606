mod audio;
mod ids;
mod share;
mod user;

pub use audio::{
    AudioListPage, AudioListQuery, AudioRecord, DownloadAudio, OrderType, SharedTo, UpdateAudio,
    AAC_EXTENSION,
};
pub use ids::{AudioId, BlobId, UserId};
pub use share::{Page, SharedCount, SharedCountsPage};
pub use user::{CreateUser, User};
