//! Data Access Layer for linkmark
//!
//! SQLite-backed persistence behind owner-scoped repository traits. The
//! embedded database stands in for the hosted relational store; its
//! row-level security becomes an `owner = ?` predicate on every statement.

pub mod repository;
pub mod schema;

pub use repository::{BookmarkRepository, SqliteBookmarkRepository};

use linkmark_core::{LinkmarkError, Result};
use std::path::Path;
use std::sync::Arc;
use tokio_rusqlite::Connection;

/// Database manager for handling SQLite connections
pub struct DatabaseManager {
    connection: Arc<Connection>,
}

impl DatabaseManager {
    /// Create a new database manager with the specified path
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let connection =
            Connection::open(path)
                .await
                .map_err(|e| LinkmarkError::Configuration {
                    details: format!("failed to open database: {}", e),
                })?;

        let manager = Self {
            connection: Arc::new(connection),
        };
        manager.initialize_schema().await?;

        Ok(manager)
    }

    /// Create an in-memory database (for testing)
    pub async fn in_memory() -> Result<Self> {
        let connection =
            Connection::open(":memory:")
                .await
                .map_err(|e| LinkmarkError::Configuration {
                    details: format!("failed to create in-memory database: {}", e),
                })?;

        let manager = Self {
            connection: Arc::new(connection),
        };
        manager.initialize_schema().await?;

        Ok(manager)
    }

    /// Initialize database schema
    async fn initialize_schema(&self) -> Result<()> {
        self.connection
            .call(|conn| {
                conn.execute_batch(schema::SCHEMA_SQL)?;
                Ok(())
            })
            .await
            .map_err(|e| LinkmarkError::Configuration {
                details: format!("failed to initialize schema: {}", e),
            })?;

        Ok(())
    }

    /// Build a bookmark repository over this database
    pub fn bookmark_repository(&self) -> SqliteBookmarkRepository {
        SqliteBookmarkRepository::new(Arc::clone(&self.connection))
    }

    /// Get the connection for repository operations
    pub fn connection(&self) -> Arc<Connection> {
        Arc::clone(&self.connection)
    }
}
