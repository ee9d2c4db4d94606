/// Share registry domain types
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Plain offset/limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

/// How many audio items are shared with one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedCount {
    pub id: UserId,
    pub name: String,
    pub shared_records: i64,
}

/// One page of per-user share counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedCountsPage {
    /// Number of users with at least one share, before pagination
    pub total_count: i64,
    pub users: Vec<SharedCount>,
}
