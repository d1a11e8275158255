//! Idempotent schema initialization.
//!
//! Additive DDL only: every statement is `IF NOT EXISTS`, so `initialize`
//! is safe to call on every startup. There is no migration framework or
//! schema versioning.

use sqlx::postgres::PgPool;
use tracing::info;

use scrollwise_core::{Error, Result};

/// DDL statements in dependency order (referenced tables first).
const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS collections (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookmarks (
        id BIGSERIAL PRIMARY KEY,
        text TEXT NOT NULL,
        title TEXT,
        collection_id BIGINT REFERENCES collections(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookmark_tags (
        bookmark_id BIGINT REFERENCES bookmarks(id) ON DELETE CASCADE,
        tag_id BIGINT REFERENCES tags(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (bookmark_id, tag_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_bookmarks_collection_id ON bookmarks(collection_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookmark_tags_bookmark_id ON bookmark_tags(bookmark_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookmark_tags_tag_id ON bookmark_tags(tag_id)",
];

/// Create all tables and indexes if absent.
///
/// Failure here is fatal for startup; the error propagates to the caller.
pub async fn initialize(pool: &PgPool) -> Result<()> {
    for statement in DDL {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }

    info!(
        subsystem = "db",
        component = "schema",
        op = "initialize",
        "Schema initialized"
    );
    Ok(())
}
