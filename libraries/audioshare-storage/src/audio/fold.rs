//! Folding flat list rows into audio records
//!
//! The list query joins every audio with its shares, yielding one row per
//! (audio, share) pair, or a single row with no share for an audio nobody
//! else can see.

use audioshare_core::types::{AudioListPage, AudioRecord, SharedTo};

/// One row of the joined list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioListRow {
    /// `count(*) OVER ()` of the unpaginated audio set
    pub total_count: i64,
    /// Audio columns; `shared_to` is ignored
    pub record: AudioRecord,
    pub share: Option<SharedTo>,
}

/// Fold rows into records in a single pass.
///
/// Precondition: all rows of one audio are adjacent. The fold only compares
/// each row with the record emitted last, so rows of the same audio split by
/// another audio produce duplicate records. The list query orders by a key
/// ending in `audio_id` to keep that guarantee.
pub fn fold_rows<I>(rows: I) -> AudioListPage
where
    I: IntoIterator<Item = AudioListRow>,
{
    let mut page = AudioListPage::default();

    for row in rows {
        page.total_count = row.total_count;

        match page.records.last_mut() {
            Some(last) if last.same_audio(&row.record) => {
                if let Some(share) = row.share {
                    last.shared_to.get_or_insert_with(Vec::new).push(share);
                }
            }
            _ => {
                let mut record = row.record;
                record.shared_to = row.share.map(|share| vec![share]);
                page.records.push(record);
            }
        }
    }

    page
}
