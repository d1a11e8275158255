//! Repository and backend trait definitions.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Bookmark, Collection, CreateBookmarkRequest, Tag, UpdateBookmarkRequest};

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Storage operations for bookmarks and their tag associations.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Insert a new bookmark and its tag associations atomically.
    async fn create(&self, req: CreateBookmarkRequest) -> Result<i64>;

    /// Fetch a bookmark with its collection name and tag list.
    ///
    /// Returns `None` when the id does not exist.
    async fn get(&self, id: i64) -> Result<Option<Bookmark>>;

    /// List all bookmarks, newest first, enriched with collection and tags.
    async fn list(&self) -> Result<Vec<Bookmark>>;

    /// Apply a partial update. A present `tag_ids` replaces the tag set.
    async fn update(&self, id: i64, req: UpdateBookmarkRequest) -> Result<()>;

    /// List bookmarks carrying the given tag, newest first.
    async fn list_by_tag(&self, tag_id: i64) -> Result<Vec<Bookmark>>;

    /// List bookmarks in the given collection, newest first.
    async fn list_by_collection(&self, collection_id: i64) -> Result<Vec<Bookmark>>;
}

/// Storage operations for collections.
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Create a collection and return its generated id.
    async fn create(&self, name: &str) -> Result<i64>;

    /// List all collections, ordered by name.
    async fn list(&self) -> Result<Vec<Collection>>;

    /// Delete a collection. Dependent bookmarks are detached, not deleted.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Storage operations for tags.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Create a tag and return its generated id.
    async fn create(&self, name: &str) -> Result<i64>;

    /// List all tags, ordered by name.
    async fn list(&self) -> Result<Vec<Tag>>;

    /// Delete a tag. Association rows cascade; bookmarks survive.
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
