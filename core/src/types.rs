//! Core data types shared across the linkmark workspace

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifier of the authenticated user a bookmark belongs to.
///
/// Supplied by the authentication layer; every store operation is scoped
/// to exactly one owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted bookmark record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    /// System-generated identifier, immutable
    pub id: Uuid,
    /// Owning user, immutable
    pub owner: OwnerId,
    /// Normalized absolute URL (tracking parameters stripped on write)
    pub url: String,
    /// Display title, derived by the enrichment pipeline
    pub title: String,
    /// Absolute URL of the favicon image
    pub favicon: String,
    /// Derived textual summary
    pub summary: String,
    /// Normalized user tags (lower-case, deduplicated, capped)
    pub tags: Vec<String>,
    /// Manual-ordering key within the owner's collection
    pub position: i64,
    /// Creation timestamp, immutable; breaks position ties
    pub created_at: DateTime<Utc>,
}

/// Extracted page metadata produced by the enrichment pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Display title (entity-decoded, tag-stripped, length-capped)
    pub title: String,
    /// Absolute favicon URL
    pub favicon: String,
    /// Name of the strategy that produced this result ("fallback" when
    /// every network strategy was exhausted)
    pub method: String,
}

/// Title and summary composed by the enrichment pipeline for one URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedContent {
    pub metadata: PageMetadata,
    pub summary: String,
}

/// One id → position assignment within a bulk reorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub id: Uuid,
    pub position: i64,
}

/// Sort key for bookmark listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    /// Manual ordering (ties broken by creation time)
    #[default]
    Position,
    CreatedAt,
    Title,
}

/// Sort direction for bookmark listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Pagination and ordering options for `list`
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub limit: usize,
    pub offset: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            sort_by: SortBy::Position,
            sort_order: SortOrder::Ascending,
        }
    }
}

/// One page of a bookmark listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkPage {
    pub items: Vec<Bookmark>,
    /// Total number of bookmarks for the owner (before pagination)
    pub total: usize,
    /// Whether `offset + limit < total`
    pub has_more: bool,
}
