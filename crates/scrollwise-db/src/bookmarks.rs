//! Bookmark repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use scrollwise_core::{
    Bookmark, BookmarkRepository, CreateBookmarkRequest, Error, Result, TagRef,
    UpdateBookmarkRequest,
};

/// PostgreSQL implementation of BookmarkRepository.
#[derive(Clone)]
pub struct PgBookmarkRepository {
    pool: Pool<Postgres>,
}

impl PgBookmarkRepository {
    /// Create a new PgBookmarkRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load tags for a set of bookmarks in one batched query.
    ///
    /// Returns a map from bookmark id to its tag list. One query regardless
    /// of how many bookmarks are in the result set.
    async fn tags_for_bookmarks(&self, bookmark_ids: &[i64]) -> Result<HashMap<i64, Vec<TagRef>>> {
        if bookmark_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT bt.bookmark_id, t.id, t.name
            FROM tags t
            JOIN bookmark_tags bt ON t.id = bt.tag_id
            WHERE bt.bookmark_id = ANY($1)
            "#,
        )
        .bind(bookmark_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut by_bookmark: HashMap<i64, Vec<TagRef>> = HashMap::new();
        for row in rows {
            by_bookmark
                .entry(row.get("bookmark_id"))
                .or_default()
                .push(TagRef {
                    id: row.get("id"),
                    name: row.get("name"),
                });
        }
        Ok(by_bookmark)
    }

    /// Run a bookmark listing query and enrich the rows with their tag sets.
    async fn list_enriched(&self, rows: Vec<PgRow>) -> Result<Vec<Bookmark>> {
        let mut bookmarks: Vec<Bookmark> = rows.into_iter().map(bookmark_from_row).collect();

        let ids: Vec<i64> = bookmarks.iter().map(|b| b.id).collect();
        let mut tags = self.tags_for_bookmarks(&ids).await?;
        for bookmark in &mut bookmarks {
            bookmark.tags = tags.remove(&bookmark.id).unwrap_or_default();
        }
        Ok(bookmarks)
    }
}

/// Map a joined bookmark row (with `collection_name`) to the model type.
/// Tags are filled in separately.
fn bookmark_from_row(row: PgRow) -> Bookmark {
    Bookmark {
        id: row.get("id"),
        text: row.get("text"),
        title: row.get("title"),
        collection_id: row.get("collection_id"),
        collection_name: row.get("collection_name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        tags: Vec::new(),
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn create(&self, req: CreateBookmarkRequest) -> Result<i64> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let row = sqlx::query(
            "INSERT INTO bookmarks (text, title, collection_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&req.text)
        .bind(&req.title)
        .bind(req.collection_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;
        let bookmark_id: i64 = row.get("id");

        for tag_id in &req.tag_ids {
            sqlx::query("INSERT INTO bookmark_tags (bookmark_id, tag_id) VALUES ($1, $2)")
                .bind(bookmark_id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(bookmark_id)
    }

    async fn get(&self, id: i64) -> Result<Option<Bookmark>> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.text, b.title, b.collection_id, c.name AS collection_name,
                   b.created_at, b.updated_at
            FROM bookmarks b
            LEFT JOIN collections c ON b.collection_id = c.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut bookmark = bookmark_from_row(row);

        // Tag rows come back in storage order; no ordering is guaranteed.
        let tag_rows = sqlx::query(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN bookmark_tags bt ON t.id = bt.tag_id
            WHERE bt.bookmark_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        bookmark.tags = tag_rows
            .into_iter()
            .map(|r| TagRef {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect();

        Ok(Some(bookmark))
    }

    async fn list(&self) -> Result<Vec<Bookmark>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.text, b.title, b.collection_id, c.name AS collection_name,
                   b.created_at, b.updated_at
            FROM bookmarks b
            LEFT JOIN collections c ON b.collection_id = c.id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        self.list_enriched(rows).await
    }

    async fn update(&self, id: i64, req: UpdateBookmarkRequest) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        if let Some(title) = &req.title {
            sqlx::query(
                "UPDATE bookmarks SET title = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
            )
            .bind(title)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        }

        if let Some(collection_id) = req.collection_id {
            sqlx::query(
                "UPDATE bookmarks SET collection_id = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
            )
            .bind(collection_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        }

        // Replacement semantics: drop the whole tag set, reinsert the new one.
        if let Some(tag_ids) = &req.tag_ids {
            sqlx::query("DELETE FROM bookmark_tags WHERE bookmark_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;

            for tag_id in tag_ids {
                sqlx::query("INSERT INTO bookmark_tags (bookmark_id, tag_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(tag_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(Error::Database)?;
            }
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    async fn list_by_tag(&self, tag_id: i64) -> Result<Vec<Bookmark>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.text, b.title, b.collection_id, c.name AS collection_name,
                   b.created_at, b.updated_at
            FROM bookmarks b
            LEFT JOIN collections c ON b.collection_id = c.id
            JOIN bookmark_tags bt ON b.id = bt.bookmark_id
            WHERE bt.tag_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        self.list_enriched(rows).await
    }

    async fn list_by_collection(&self, collection_id: i64) -> Result<Vec<Bookmark>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.text, b.title, b.collection_id, c.name AS collection_name,
                   b.created_at, b.updated_at
            FROM bookmarks b
            LEFT JOIN collections c ON b.collection_id = c.id
            WHERE b.collection_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        self.list_enriched(rows).await
    }
}
