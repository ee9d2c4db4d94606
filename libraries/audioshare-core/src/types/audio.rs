/// Audio catalog domain types
use crate::error::{AudioShareError, Result};
use crate::types::{AudioId, BlobId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File extension of every stored blob
pub const AAC_EXTENSION: &str = "aac";

/// Partial description update. At least one field must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateAudio {
    #[serde(default)]
    pub title: Option<String>,

    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<i64>,
}

impl UpdateAudio {
    pub fn validate(&self) -> Result<()> {
        if self.title.is_none() && self.duration.is_none() {
            return Err(AudioShareError::EmptyUpdate);
        }
        if self.duration.is_some_and(|d| d < 0) {
            return Err(AudioShareError::invalid_input(
                "duration must not be negative",
            ));
        }
        Ok(())
    }
}

/// What a download needs: the title for the file name and the blob to stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadAudio {
    pub title: String,
    pub blob_id: BlobId,
}

/// Ordering of the audio list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Owned before shared, then owner name, then title
    Owner,
    /// Title only
    Alphabet,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Owner => "owner",
            OrderType::Alphabet => "alphabet",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = AudioShareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "owner" => Ok(OrderType::Owner),
            "alphabet" => Ok(OrderType::Alphabet),
            other => Err(AudioShareError::UnknownOrderType(other.to_string())),
        }
    }
}

/// Window and ordering for `AudioCatalog::list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioListQuery {
    pub offset: u32,
    pub limit: u32,
    pub order: OrderType,
}

/// A user an audio is shared with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedTo {
    pub id: UserId,
    pub name: String,
}

/// One entry of the audio list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRecord {
    pub id: AudioId,

    /// Audio title
    pub name: String,

    pub is_owner: bool,
    pub owner_id: UserId,
    pub owner_name: String,

    /// `None` when the audio is not shared with anyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_to: Option<Vec<SharedTo>>,
}

impl AudioRecord {
    /// Compares the audio-identifying columns only, ignoring shares
    pub fn same_audio(&self, other: &AudioRecord) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.is_owner == other.is_owner
            && self.owner_id == other.owner_id
            && self.owner_name == other.owner_name
    }
}

/// One page of the audio list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioListPage {
    /// Matching audio count before pagination
    pub total_count: i64,
    pub records: Vec<AudioRecord>,
}
