//! Content entity mirrored from persistent storage.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Timestamp plus the actor responsible for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorStamp {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub by: String,
}

/// Editorial workflow state. Exactly five values exist; the store never
/// holds anything outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Pending,
    Correction,
    Draft,
    Published,
    Reviewed,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 5] = [
        ContentStatus::Pending,
        ContentStatus::Correction,
        ContentStatus::Draft,
        ContentStatus::Published,
        ContentStatus::Reviewed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Correction => "correction",
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Reviewed => "reviewed",
        }
    }

    /// Parse a status string, returning `None` for anything outside the
    /// five known values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ContentStatus::Pending),
            "correction" => Some(ContentStatus::Correction),
            "draft" => Some(ContentStatus::Draft),
            "published" => Some(ContentStatus::Published),
            "reviewed" => Some(ContentStatus::Reviewed),
            _ => None,
        }
    }
}

/// A content item as stored and as served.
///
/// Field names on the wire are fixed by the existing API and by cached
/// snapshots already sitting in the cache store; the serde renames must
/// not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "subDesc")]
    pub sub_desc: String,
    pub alt: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
    pub tags: Vec<String>,
    pub related: Vec<String>,
    pub status: ContentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<ActorStamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Vec<ActorStamp>>,
}

impl ContentRecord {
    /// History of update stamps, oldest first. Empty when the item has
    /// never been updated.
    pub fn update_history(&self) -> &[ActorStamp] {
        self.updated.as_deref().unwrap_or(&[])
    }
}
