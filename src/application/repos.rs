//! Capability traits describing the persistence and cache adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::content::{ContentRecord, ContentStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Backend(String),
    #[error("document could not be decoded: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

#[derive(Debug, Error)]
#[error("cache error: {0}")]
pub struct CacheError(String);

impl CacheError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// Payload for inserting a new content item. The store stamps
/// `created_at` at insertion time; the identifier is assigned by the
/// backend.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub sub_desc: String,
    pub alt: String,
    pub thumbnail_url: String,
    pub tags: Vec<String>,
    pub related: Vec<String>,
    pub status: ContentStatus,
    pub created_by: String,
}

/// Partial field set applied as a merge: `None` fields are left
/// untouched in the stored document.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub sub_desc: Option<String>,
    pub alt: Option<String>,
    pub thumbnail_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub related: Option<Vec<String>>,
    pub status: Option<ContentStatus>,
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.sub_desc.is_none()
            && self.alt.is_none()
            && self.thumbnail_url.is_none()
            && self.tags.is_none()
            && self.related.is_none()
            && self.status.is_none()
    }
}

/// Document-store capability consumed by the content service.
///
/// Implementations own the query language; callers speak in domain terms.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentRecord>, StoreError>;

    /// Existence probe by slug. Implementations should fetch a minimal
    /// projection rather than the whole document.
    async fn slug_exists(&self, slug: &str) -> Result<bool, StoreError>;

    /// One page of documents in the store's natural order, skipping
    /// `skip` and returning at most `limit`. `statuses` of `None` means
    /// no status predicate at all.
    async fn list_page(
        &self,
        statuses: Option<&[ContentStatus]>,
        limit: u32,
        skip: u64,
    ) -> Result<Vec<ContentRecord>, StoreError>;

    async fn insert(&self, content: NewContent) -> Result<(), StoreError>;

    /// Merge `patch` into the document for `slug` and append one
    /// `{at: now, by}` entry to its update history, as a single store
    /// operation. Never creates a document.
    async fn merge_update(
        &self,
        slug: &str,
        patch: &ContentPatch,
        by: &str,
    ) -> Result<(), StoreError>;

    async fn delete_by_slug(&self, slug: &str) -> Result<(), StoreError>;
}

/// Key-value cache capability with expiring entries.
#[async_trait]
pub trait ContentCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
