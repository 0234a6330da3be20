//! Repository implementation for bookmark persistence

use async_trait::async_trait;
use linkmark_core::{
    codes, Bookmark, BookmarkPage, ListOptions, OwnerId, PositionUpdate, SortBy, SortOrder,
    StoreError,
};
use chrono::{DateTime, Utc};
use rusqlite::Row;
use std::sync::Arc;
use tokio_rusqlite::Connection;
use uuid::Uuid;

/// Owner-scoped persistence operations for bookmarks.
///
/// Every method applies an owner-equality predicate; a mutation matching
/// zero rows (missing id or another owner's row) is reported as a
/// not-found [`StoreError`] — the store never reveals which case it was.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Insert a bookmark, assigning the next position for its owner.
    ///
    /// The position read and the insert run inside one transaction so
    /// concurrent creates by the same owner cannot assign duplicates.
    /// Returns the stored row.
    async fn insert(&self, bookmark: &Bookmark) -> Result<Bookmark, StoreError>;

    async fn get_by_id(&self, owner: &OwnerId, id: &Uuid) -> Result<Option<Bookmark>, StoreError>;

    /// One page of the owner's bookmarks plus the total count.
    async fn list(&self, owner: &OwnerId, options: &ListOptions) -> Result<BookmarkPage, StoreError>;

    /// Every bookmark for the owner in manual order. Input for search
    /// and analytics, which filter and rank client-side.
    async fn list_all(&self, owner: &OwnerId) -> Result<Vec<Bookmark>, StoreError>;

    async fn delete(&self, owner: &OwnerId, id: &Uuid) -> Result<(), StoreError>;

    async fn update_tags(
        &self,
        owner: &OwnerId,
        id: &Uuid,
        tags: &[String],
    ) -> Result<(), StoreError>;

    async fn max_position(&self, owner: &OwnerId) -> Result<i64, StoreError>;

    /// Apply a batch of id → position assignments in one transaction.
    /// Ids not visible to the owner are skipped, matching upsert
    /// semantics — the caller has already computed the order.
    async fn bulk_reorder(
        &self,
        owner: &OwnerId,
        updates: &[PositionUpdate],
    ) -> Result<(), StoreError>;

    async fn count(&self, owner: &OwnerId) -> Result<usize, StoreError>;
}

const SELECT_COLUMNS: &str =
    "id, owner, url, title, favicon, summary, tags, position, created_at";

/// Map a row to a Bookmark
fn row_to_bookmark(row: &Row) -> rusqlite::Result<Bookmark> {
    let id_str: String = row.get(0)?;
    let owner: String = row.get(1)?;
    let url: String = row.get(2)?;
    let title: String = row.get(3)?;
    let favicon: String = row.get(4)?;
    let summary: String = row.get(5)?;
    let tags_json: String = row.get(6)?;
    let position: i64 = row.get(7)?;
    let created_at_ms: i64 = row.get(8)?;

    let id = Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::nil());
    let tags: Vec<String> = serde_json::from_str(&tags_json).unwrap_or_default();

    Ok(Bookmark {
        id,
        owner: OwnerId::new(owner),
        url,
        title,
        favicon,
        summary,
        tags,
        position,
        created_at: DateTime::from_timestamp_millis(created_at_ms).unwrap_or_else(Utc::now),
    })
}

fn order_clause(sort_by: SortBy, sort_order: SortOrder) -> &'static str {
    match (sort_by, sort_order) {
        // Ties in position are broken by creation time
        (SortBy::Position, SortOrder::Ascending) => "position ASC, created_at ASC",
        (SortBy::Position, SortOrder::Descending) => "position DESC, created_at DESC",
        (SortBy::CreatedAt, SortOrder::Ascending) => "created_at ASC",
        (SortBy::CreatedAt, SortOrder::Descending) => "created_at DESC",
        (SortBy::Title, SortOrder::Ascending) => "title COLLATE NOCASE ASC",
        (SortBy::Title, SortOrder::Descending) => "title COLLATE NOCASE DESC",
    }
}

/// SQLite implementation of BookmarkRepository
pub struct SqliteBookmarkRepository {
    connection: Arc<Connection>,
}

impl SqliteBookmarkRepository {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl BookmarkRepository for SqliteBookmarkRepository {
    async fn insert(&self, bookmark: &Bookmark) -> Result<Bookmark, StoreError> {
        let mut stored = bookmark.clone();
        let record = bookmark.clone();

        let position = self
            .connection
            .call(move |conn| {
                let tags_json = serde_json::to_string(&record.tags).unwrap_or_default();
                let tx = conn.transaction()?;
                let position: i64 = tx.query_row(
                    "SELECT COALESCE(MAX(position), 0) + 1 FROM bookmarks WHERE owner = ?1",
                    [record.owner.as_str()],
                    |row| row.get(0),
                )?;
                tx.execute(
                    "INSERT INTO bookmarks (id, owner, url, title, favicon, summary, tags, position, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    rusqlite::params![
                        record.id.to_string(),
                        record.owner.as_str(),
                        record.url,
                        record.title,
                        record.favicon,
                        record.summary,
                        tags_json,
                        position,
                        record.created_at.timestamp_millis(),
                    ],
                )?;
                tx.commit()?;
                Ok(position)
            })
            .await
            .map_err(|e| StoreError::backend(codes::CREATE_BOOKMARK_FAILED, e))?;

        stored.position = position;
        Ok(stored)
    }

    async fn get_by_id(&self, owner: &OwnerId, id: &Uuid) -> Result<Option<Bookmark>, StoreError> {
        let owner = owner.as_str().to_string();
        let id = id.to_string();

        self.connection
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM bookmarks WHERE owner = ?1 AND id = ?2",
                    SELECT_COLUMNS
                ))?;
                match stmt.query_row([&owner, &id], row_to_bookmark) {
                    Ok(bookmark) => Ok(Some(bookmark)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(|e| StoreError::backend(codes::GET_BOOKMARK_FAILED, e))
    }

    async fn list(
        &self,
        owner: &OwnerId,
        options: &ListOptions,
    ) -> Result<BookmarkPage, StoreError> {
        let owner = owner.as_str().to_string();
        let limit = options.limit;
        let offset = options.offset;
        let order = order_clause(options.sort_by, options.sort_order);

        let (items, total) = self
            .connection
            .call(move |conn| {
                let total: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM bookmarks WHERE owner = ?1",
                    [&owner],
                    |row| row.get(0),
                )?;

                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM bookmarks WHERE owner = ?1 ORDER BY {} LIMIT ?2 OFFSET ?3",
                    SELECT_COLUMNS, order
                ))?;
                let rows = stmt.query_map(
                    rusqlite::params![owner, limit as i64, offset as i64],
                    row_to_bookmark,
                )?;

                let mut items = Vec::new();
                for row in rows {
                    items.push(row?);
                }
                Ok((items, total as usize))
            })
            .await
            .map_err(|e| StoreError::backend(codes::LIST_BOOKMARKS_FAILED, e))?;

        Ok(BookmarkPage {
            has_more: offset + limit < total,
            items,
            total,
        })
    }

    async fn list_all(&self, owner: &OwnerId) -> Result<Vec<Bookmark>, StoreError> {
        let owner = owner.as_str().to_string();

        self.connection
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM bookmarks WHERE owner = ?1 ORDER BY position ASC, created_at ASC",
                    SELECT_COLUMNS
                ))?;
                let rows = stmt.query_map([&owner], row_to_bookmark)?;

                let mut items = Vec::new();
                for row in rows {
                    items.push(row?);
                }
                Ok(items)
            })
            .await
            .map_err(|e| StoreError::backend(codes::LIST_BOOKMARKS_FAILED, e))
    }

    async fn delete(&self, owner: &OwnerId, id: &Uuid) -> Result<(), StoreError> {
        let owner = owner.as_str().to_string();
        let id = id.to_string();

        let affected = self
            .connection
            .call(move |conn| {
                Ok(conn.execute(
                    "DELETE FROM bookmarks WHERE owner = ?1 AND id = ?2",
                    [&owner, &id],
                )?)
            })
            .await
            .map_err(|e| StoreError::backend(codes::DELETE_BOOKMARK_FAILED, e))?;

        if affected == 0 {
            return Err(StoreError::not_found(codes::DELETE_BOOKMARK_FAILED));
        }
        Ok(())
    }

    async fn update_tags(
        &self,
        owner: &OwnerId,
        id: &Uuid,
        tags: &[String],
    ) -> Result<(), StoreError> {
        let owner = owner.as_str().to_string();
        let id = id.to_string();
        let tags_json = serde_json::to_string(tags).unwrap_or_default();

        let affected = self
            .connection
            .call(move |conn| {
                Ok(conn.execute(
                    "UPDATE bookmarks SET tags = ?1 WHERE owner = ?2 AND id = ?3",
                    [&tags_json, &owner, &id],
                )?)
            })
            .await
            .map_err(|e| StoreError::backend(codes::UPDATE_TAGS_FAILED, e))?;

        if affected == 0 {
            return Err(StoreError::not_found(codes::UPDATE_TAGS_FAILED));
        }
        Ok(())
    }

    async fn max_position(&self, owner: &OwnerId) -> Result<i64, StoreError> {
        let owner = owner.as_str().to_string();

        self.connection
            .call(move |conn| {
                Ok(conn.query_row(
                    "SELECT COALESCE(MAX(position), 0) FROM bookmarks WHERE owner = ?1",
                    [&owner],
                    |row| row.get(0),
                )?)
            })
            .await
            .map_err(|e| StoreError::backend(codes::LIST_BOOKMARKS_FAILED, e))
    }

    async fn bulk_reorder(
        &self,
        owner: &OwnerId,
        updates: &[PositionUpdate],
    ) -> Result<(), StoreError> {
        let owner = owner.as_str().to_string();
        let updates: Vec<(String, i64)> = updates
            .iter()
            .map(|u| (u.id.to_string(), u.position))
            .collect();

        self.connection
            .call(move |conn| {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        "UPDATE bookmarks SET position = ?1 WHERE owner = ?2 AND id = ?3",
                    )?;
                    for (id, position) in &updates {
                        stmt.execute(rusqlite::params![position, owner, id])?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::backend(codes::REORDER_BOOKMARKS_FAILED, e))
    }

    async fn count(&self, owner: &OwnerId) -> Result<usize, StoreError> {
        let owner = owner.as_str().to_string();

        self.connection
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM bookmarks WHERE owner = ?1",
                    [&owner],
                    |row| row.get(0),
                )?;
                Ok(count as usize)
            })
            .await
            .map_err(|e| StoreError::backend(codes::LIST_BOOKMARKS_FAILED, e))
    }
}
