//! # scrollwise-db
//!
//! PostgreSQL database layer for scrollwise.
//!
//! This crate provides:
//! - Connection pool management
//! - Idempotent schema initialization
//! - Repository implementations for bookmarks, collections, and tags
//!
//! ## Example
//!
//! ```rust,ignore
//! use scrollwise_core::{BookmarkRepository, CreateBookmarkRequest};
//! use scrollwise_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/scrollwise").await?;
//!     db.initialize_schema().await?;
//!
//!     let id = db.bookmarks.create(CreateBookmarkRequest {
//!         text: "Hello, world!".to_string(),
//!         title: None,
//!         collection_id: None,
//!         tag_ids: vec![],
//!     }).await?;
//!
//!     println!("Created bookmark: {}", id);
//!     Ok(())
//! }
//! ```

pub mod bookmarks;
pub mod collections;
pub mod config;
pub mod pool;
pub mod schema;
pub mod tags;

// Re-export core types
pub use scrollwise_core::*;

// Re-export repository implementations
pub use bookmarks::PgBookmarkRepository;
pub use collections::PgCollectionRepository;
pub use config::DbConfig;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use tags::PgTagRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Bookmark repository for CRUD and tag associations.
    pub bookmarks: PgBookmarkRepository,
    /// Collection repository.
    pub collections: PgCollectionRepository,
    /// Tag repository.
    pub tags: PgTagRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            bookmarks: PgBookmarkRepository::new(pool.clone()),
            collections: PgCollectionRepository::new(pool.clone()),
            tags: PgTagRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Create all tables and indexes if absent. Safe to call repeatedly.
    pub async fn initialize_schema(&self) -> Result<()> {
        schema::initialize(&self.pool).await
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
