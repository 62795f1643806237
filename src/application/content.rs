//! Content access service: cache-aside reads, store-only listings,
//! write-through invalidation.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::repos::{
    CacheError, ContentCache, ContentPatch, ContentStore, NewContent, StoreError,
};
use crate::domain::content::{ContentRecord, ContentStatus};

/// Literal cache key prefix. Existing cached entries were written under
/// this prefix; it must be reproduced exactly.
const CACHE_KEY_PREFIX: &str = "content:";

/// Lifetime of a cached snapshot. Entries are never refreshed in place,
/// only deleted on write or left to expire.
pub const CACHE_TTL_SECS: u64 = 60;

const DEFAULT_LIMIT: u32 = 30;
const DEFAULT_PAGE: u32 = 0;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content `{slug}` not found")]
    NotFound { slug: String },
    #[error("content `{slug}` already exists")]
    SlugTaken { slug: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Status selector as it arrives from the query string: a single value
/// or a list of values.
#[derive(Debug, Clone)]
pub enum StatusSelector {
    One(String),
    Many(Vec<String>),
}

/// Listing parameters. `None` fields fall back to their defaults
/// (limit 30, page 0) rather than erroring.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub status: Option<StatusSelector>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

/// Orchestrates the document store and the cache store.
///
/// Holds no state beyond the two capability handles; safe to share and
/// invoke concurrently without internal locking.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    cache: Arc<dyn ContentCache>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>, cache: Arc<dyn ContentCache>) -> Self {
        Self { store, cache }
    }

    pub fn cache_key(slug: &str) -> String {
        format!("{CACHE_KEY_PREFIX}{slug}")
    }

    /// Cache-aside read. On a hit the store is never consulted; on a
    /// miss the store result is written back with a 60-second expiry.
    /// Failure to populate the cache does not fail the read.
    pub async fn get(&self, slug: &str) -> Result<ContentRecord, ContentError> {
        let key = Self::cache_key(slug);

        if let Some(cached) = self.cache.get(&key).await? {
            match serde_json::from_str::<ContentRecord>(&cached) {
                Ok(record) => {
                    counter!("credenza_cache_hit_total").increment(1);
                    debug!(slug, "content served from cache");
                    return Ok(record);
                }
                Err(err) => {
                    // A snapshot we cannot decode is as good as absent.
                    warn!(slug, error = %err, "discarding undecodable cache snapshot");
                }
            }
        }
        counter!("credenza_cache_miss_total").increment(1);

        let record = self
            .store
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ContentError::NotFound {
                slug: slug.to_string(),
            })?;

        match serde_json::to_string(&record) {
            Ok(snapshot) => {
                if let Err(err) = self
                    .cache
                    .set_with_expiry(&key, &snapshot, CACHE_TTL_SECS)
                    .await
                {
                    counter!("credenza_cache_populate_error_total").increment(1);
                    warn!(slug, error = %err, "cache population failed, read served from store");
                }
            }
            Err(err) => {
                warn!(slug, error = %err, "content snapshot could not be serialized for caching");
            }
        }

        Ok(record)
    }

    /// Store-only listing. Listings are query-shaped, not single-key
    /// cacheable, so this path never touches the cache.
    pub async fn list(&self, request: ListRequest) -> Result<Vec<ContentRecord>, ContentError> {
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
        let page = request.page.unwrap_or(DEFAULT_PAGE);
        let statuses = resolve_status_filter(request.status.as_ref());

        let skip = u64::from(page) * u64::from(limit);
        let records = self
            .store
            .list_page(statuses.as_deref(), limit, skip)
            .await?;

        Ok(records)
    }

    /// Insert a new item, rejecting duplicate slugs. Nothing is cached
    /// for an unseen slug, so the cache is untouched.
    pub async fn create(&self, content: NewContent) -> Result<(), ContentError> {
        if self.store.slug_exists(&content.slug).await? {
            return Err(ContentError::SlugTaken {
                slug: content.slug,
            });
        }

        let slug = content.slug.clone();
        self.store.insert(content).await?;
        info!(slug, "content created");

        Ok(())
    }

    /// Merge a partial field set into an existing item and append an
    /// update stamp, then invalidate the cached snapshot. Invalidation
    /// failure after the committed write is tolerated: the entry goes
    /// stale for at most the TTL window.
    pub async fn update(
        &self,
        slug: &str,
        patch: &ContentPatch,
        by: &str,
    ) -> Result<(), ContentError> {
        if !self.store.slug_exists(slug).await? {
            return Err(ContentError::NotFound {
                slug: slug.to_string(),
            });
        }

        self.store.merge_update(slug, patch, by).await?;
        info!(slug, by, "content updated");
        self.invalidate(slug).await;

        Ok(())
    }

    /// Delete an existing item, then invalidate its cached snapshot with
    /// the same partial-failure tolerance as `update`.
    pub async fn delete(&self, slug: &str) -> Result<(), ContentError> {
        if !self.store.slug_exists(slug).await? {
            return Err(ContentError::NotFound {
                slug: slug.to_string(),
            });
        }

        self.store.delete_by_slug(slug).await?;
        info!(slug, "content deleted");
        self.invalidate(slug).await;

        Ok(())
    }

    /// Best-effort cache delete: result discarded, failure logged and
    /// counted. Issued unconditionally, whether or not an entry existed.
    async fn invalidate(&self, slug: &str) {
        let key = Self::cache_key(slug);
        if let Err(err) = self.cache.delete(&key).await {
            counter!("credenza_cache_invalidate_error_total").increment(1);
            warn!(slug, error = %err, "cache invalidation failed, entry expires with its TTL");
        }
    }
}

/// Resolve a status selector to the effective predicate.
///
/// A missing selector and a single unknown value both mean "all five
/// statuses". A list keeps only the known values. An effective set that
/// is empty or covers every status is equivalent to no predicate and is
/// collapsed to `None`.
pub fn resolve_status_filter(selector: Option<&StatusSelector>) -> Option<Vec<ContentStatus>> {
    let resolved: Vec<ContentStatus> = match selector {
        None => ContentStatus::ALL.to_vec(),
        Some(StatusSelector::One(value)) => match ContentStatus::parse(value) {
            Some(status) => vec![status],
            None => ContentStatus::ALL.to_vec(),
        },
        Some(StatusSelector::Many(values)) => {
            let mut seen = Vec::new();
            for value in values {
                if let Some(status) = ContentStatus::parse(value) {
                    if !seen.contains(&status) {
                        seen.push(status);
                    }
                }
            }
            seen
        }
    };

    if resolved.is_empty() || resolved.len() == ContentStatus::ALL.len() {
        None
    } else {
        Some(resolved)
    }
}
