//! Collection repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use scrollwise_core::{Collection, CollectionRepository, Error, Result};

/// PostgreSQL implementation of CollectionRepository.
#[derive(Clone)]
pub struct PgCollectionRepository {
    pool: Pool<Postgres>,
}

impl PgCollectionRepository {
    /// Create a new PgCollectionRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn create(&self, name: &str) -> Result<i64> {
        let row = sqlx::query("INSERT INTO collections (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.get("id"))
    }

    async fn list(&self) -> Result<Vec<Collection>> {
        let rows = sqlx::query(
            "SELECT id, name, created_at, updated_at FROM collections ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| Collection {
                id: r.get("id"),
                name: r.get("name"),
                created_at: r.get("created_at"),
                updated_at: r.get("updated_at"),
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // ON DELETE SET NULL detaches dependent bookmarks without deleting them.
        sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
