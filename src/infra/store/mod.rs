//! MongoDB-backed implementation of the `ContentStore` capability.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use crate::application::repos::{ContentPatch, ContentStore, NewContent, StoreError};
use crate::domain::content::{ActorStamp, ContentRecord, ContentStatus};

const COLLECTION: &str = "contents";

#[derive(Debug, Serialize, Deserialize)]
struct StampDocument {
    at: bson::DateTime,
    by: String,
}

impl From<StampDocument> for ActorStamp {
    fn from(stamp: StampDocument) -> Self {
        Self {
            at: stamp.at.to_time_0_3(),
            by: stamp.by,
        }
    }
}

/// Persisted shape of a content item. Field names mirror the collection
/// exactly; timestamps are stored as BSON datetimes.
#[derive(Debug, Serialize, Deserialize)]
struct ContentDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    slug: String,
    title: String,
    description: String,
    #[serde(rename = "subDesc")]
    sub_desc: String,
    alt: String,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: String,
    tags: Vec<String>,
    related: Vec<String>,
    status: ContentStatus,
    created_at: bson::DateTime,
    created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    published: Option<StampDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated: Option<Vec<StampDocument>>,
}

impl From<ContentDocument> for ContentRecord {
    fn from(document: ContentDocument) -> Self {
        Self {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            slug: document.slug,
            title: document.title,
            description: document.description,
            sub_desc: document.sub_desc,
            alt: document.alt,
            thumbnail_url: document.thumbnail_url,
            tags: document.tags,
            related: document.related,
            status: document.status,
            created_at: document.created_at.to_time_0_3(),
            created_by: document.created_by,
            published: document.published.map(ActorStamp::from),
            updated: document
                .updated
                .map(|stamps| stamps.into_iter().map(ActorStamp::from).collect()),
        }
    }
}

#[derive(Clone)]
pub struct MongoContentStore {
    database: Database,
    collection: Collection<ContentDocument>,
}

impl MongoContentStore {
    pub fn new(database: Database) -> Self {
        let collection = database.collection(COLLECTION);
        Self {
            database,
            collection,
        }
    }

    pub async fn connect(url: &str, database: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        Ok(Self::new(client.database(database)))
    }

    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.database.run_command(doc! {"ping": 1}).await.map(|_| ())
    }
}

#[async_trait]
impl ContentStore for MongoContentStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentRecord>, StoreError> {
        let document = self
            .collection
            .find_one(doc! {"slug": slug})
            .await
            .map_err(StoreError::backend)?;

        Ok(document.map(ContentRecord::from))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, StoreError> {
        let probe = self
            .collection
            .clone_with_type::<Document>()
            .find_one(doc! {"slug": slug})
            .projection(doc! {"_id": 1})
            .await
            .map_err(StoreError::backend)?;

        Ok(probe.is_some())
    }

    async fn list_page(
        &self,
        statuses: Option<&[ContentStatus]>,
        limit: u32,
        skip: u64,
    ) -> Result<Vec<ContentRecord>, StoreError> {
        let pipeline = list_pipeline(statuses, limit, skip);

        let cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(StoreError::backend)?;
        let raw: Vec<Document> = cursor.try_collect().await.map_err(StoreError::backend)?;

        raw.into_iter()
            .map(|document| {
                bson::from_document::<ContentDocument>(document)
                    .map(ContentRecord::from)
                    .map_err(StoreError::decode)
            })
            .collect()
    }

    async fn insert(&self, content: NewContent) -> Result<(), StoreError> {
        let document = ContentDocument {
            id: None,
            slug: content.slug,
            title: content.title,
            description: content.description,
            sub_desc: content.sub_desc,
            alt: content.alt,
            thumbnail_url: content.thumbnail_url,
            tags: content.tags,
            related: content.related,
            status: content.status,
            created_at: bson::DateTime::now(),
            created_by: content.created_by,
            published: None,
            updated: None,
        };

        self.collection
            .insert_one(document)
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }

    async fn merge_update(
        &self,
        slug: &str,
        patch: &ContentPatch,
        by: &str,
    ) -> Result<(), StoreError> {
        let update = merge_update_document(patch, by, bson::DateTime::now());

        self.collection
            .update_one(doc! {"slug": slug}, update)
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), StoreError> {
        self.collection
            .delete_one(doc! {"slug": slug})
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }
}

/// Aggregation pipeline for one listing page. The status predicate is
/// omitted entirely when `statuses` is `None`.
fn list_pipeline(statuses: Option<&[ContentStatus]>, limit: u32, skip: u64) -> Vec<Document> {
    let mut pipeline = Vec::with_capacity(3);

    if let Some(statuses) = statuses {
        let values: Vec<Bson> = statuses
            .iter()
            .map(|status| Bson::from(status.as_str()))
            .collect();
        pipeline.push(doc! {"$match": {"status": {"$in": values}}});
    }

    pipeline.push(doc! {"$skip": i64::try_from(skip).unwrap_or(i64::MAX)});
    pipeline.push(doc! {"$limit": i64::from(limit)});

    pipeline
}

/// Single-operation update: `$set` of the supplied fields plus a `$push`
/// appending the update stamp. An empty patch still appends the stamp.
fn merge_update_document(patch: &ContentPatch, by: &str, at: bson::DateTime) -> Document {
    let mut set = Document::new();
    if let Some(slug) = &patch.slug {
        set.insert("slug", slug.as_str());
    }
    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.as_str());
    }
    if let Some(sub_desc) = &patch.sub_desc {
        set.insert("subDesc", sub_desc.as_str());
    }
    if let Some(alt) = &patch.alt {
        set.insert("alt", alt.as_str());
    }
    if let Some(thumbnail_url) = &patch.thumbnail_url {
        set.insert("thumbnailUrl", thumbnail_url.as_str());
    }
    if let Some(tags) = &patch.tags {
        set.insert("tags", tags.clone());
    }
    if let Some(related) = &patch.related {
        set.insert("related", related.clone());
    }
    if let Some(status) = patch.status {
        set.insert("status", status.as_str());
    }

    let mut update = doc! {
        "$push": {"updated": {"at": at, "by": by}},
    };
    if !set.is_empty() {
        update.insert("$set", set);
    }

    update
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_with_subset_carries_match_stage() {
        let statuses = [ContentStatus::Draft, ContentStatus::Published];
        let pipeline = list_pipeline(Some(&statuses), 10, 20);

        assert_eq!(pipeline.len(), 3);
        assert_eq!(
            pipeline[0],
            doc! {"$match": {"status": {"$in": ["draft", "published"]}}}
        );
        assert_eq!(pipeline[1], doc! {"$skip": 20_i64});
        assert_eq!(pipeline[2], doc! {"$limit": 10_i64});
    }

    #[test]
    fn pipeline_without_filter_skips_match_stage() {
        let pipeline = list_pipeline(None, 30, 0);

        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline[0], doc! {"$skip": 0_i64});
        assert_eq!(pipeline[1], doc! {"$limit": 30_i64});
    }

    #[test]
    fn merge_update_sets_only_supplied_fields() {
        let patch = ContentPatch {
            title: Some("New title".to_string()),
            status: Some(ContentStatus::Reviewed),
            ..ContentPatch::default()
        };
        let at = bson::DateTime::from_millis(1_700_000_000_000);

        let update = merge_update_document(&patch, "alice", at);

        assert_eq!(
            update.get_document("$set").expect("$set"),
            &doc! {"title": "New title", "status": "reviewed"}
        );
        assert_eq!(
            update.get_document("$push").expect("$push"),
            &doc! {"updated": {"at": at, "by": "alice"}}
        );
    }

    #[test]
    fn empty_patch_still_appends_a_stamp() {
        let at = bson::DateTime::from_millis(1_700_000_000_000);
        let update = merge_update_document(&ContentPatch::default(), "bob", at);

        assert!(update.get_document("$set").is_err());
        assert_eq!(
            update.get_document("$push").expect("$push"),
            &doc! {"updated": {"at": at, "by": "bob"}}
        );
    }

    #[test]
    fn document_maps_to_record() {
        let id = ObjectId::new();
        let document = ContentDocument {
            id: Some(id),
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            description: "d".to_string(),
            sub_desc: "s".to_string(),
            alt: "a".to_string(),
            thumbnail_url: "t".to_string(),
            tags: vec!["x".to_string()],
            related: vec![],
            status: ContentStatus::Pending,
            created_at: bson::DateTime::from_millis(1_700_000_000_000),
            created_by: "alice".to_string(),
            published: None,
            updated: Some(vec![StampDocument {
                at: bson::DateTime::from_millis(1_700_000_100_000),
                by: "bob".to_string(),
            }]),
        };

        let record = ContentRecord::from(document);

        assert_eq!(record.id, id.to_hex());
        assert_eq!(record.status, ContentStatus::Pending);
        assert_eq!(record.update_history().len(), 1);
        assert_eq!(record.update_history()[0].by, "bob");
    }

    #[test]
    fn document_serde_uses_collection_field_names() {
        let document = ContentDocument {
            id: None,
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            description: "d".to_string(),
            sub_desc: "s".to_string(),
            alt: "a".to_string(),
            thumbnail_url: "t".to_string(),
            tags: vec![],
            related: vec![],
            status: ContentStatus::Draft,
            created_at: bson::DateTime::from_millis(1_700_000_000_000),
            created_by: "alice".to_string(),
            published: None,
            updated: None,
        };

        let raw = bson::to_document(&document).expect("to_document");
        assert!(raw.contains_key("subDesc"));
        assert!(raw.contains_key("thumbnailUrl"));
        assert!(!raw.contains_key("_id"));
        assert!(!raw.contains_key("published"));
        assert_eq!(raw.get_str("status").expect("status"), "draft");
    }
}
