//! Data model types shared across scrollwise crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored text snippet with optional title, collection, and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub text: String,
    pub title: Option<String>,
    pub collection_id: Option<i64>,
    /// Name of the owning collection, joined at read time.
    pub collection_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Tags attached to this bookmark, in storage order.
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

/// A tag reference as embedded in bookmark responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
}

/// A named grouping bucket for bookmarks (one-to-many).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named label attachable to many bookmarks (many-to-many).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a bookmark.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookmarkRequest {
    pub text: String,
    pub title: Option<String>,
    pub collection_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Request payload for a partial bookmark update.
///
/// `None` fields are left untouched. A present `tag_ids` replaces the
/// bookmark's entire tag set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookmarkRequest {
    pub title: Option<String>,
    pub collection_id: Option<i64>,
    pub tag_ids: Option<Vec<i64>>,
}

impl UpdateBookmarkRequest {
    /// True when no fields were supplied (a legal no-op update).
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.collection_id.is_none() && self.tag_ids.is_none()
    }
}
