//! Bookmark service
//!
//! The composition root for one owner-scoped operation set: URL and tag
//! normalization, enrichment, persistence, reorder with optimistic
//! revert, search, and analytics. Enrichment failures never surface —
//! the only externally visible failure from `create` is a store error.

use chrono::Utc;
use data_access::BookmarkRepository;
use enrichment::EnrichmentPipeline;
use linkmark_core::tags::normalize_tags;
use linkmark_core::urlnorm::normalize_url;
use linkmark_core::{Bookmark, BookmarkPage, ListOptions, OwnerId, Result, Uuid};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analytics::{analyze, AnalyticsReport};
use crate::ordering::{assign_positions, assign_positions_for_ids, move_item};
use crate::search::{search_bookmarks, SearchQuery, SearchResult};

pub struct BookmarkService {
    repository: Arc<dyn BookmarkRepository>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl BookmarkService {
    pub fn new(repository: Arc<dyn BookmarkRepository>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self {
            repository,
            pipeline,
        }
    }

    /// Create a bookmark from a raw URL and raw tags.
    ///
    /// The URL is validated before any network call; enrichment runs
    /// metadata and summary concurrently and always produces a result
    /// (fallback included). Position is assigned by the store inside the
    /// insert transaction.
    pub async fn create(
        &self,
        owner: &OwnerId,
        raw_url: &str,
        raw_tags: &[String],
    ) -> Result<Bookmark> {
        let url = normalize_url(raw_url)?;
        let tags = normalize_tags(raw_tags);

        debug!(%owner, url, "enriching bookmark");
        let enriched = self.pipeline.enrich(&url).await;

        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            url,
            title: enriched.metadata.title,
            favicon: enriched.metadata.favicon,
            summary: enriched.summary,
            tags,
            position: 0, // assigned by the store
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(&bookmark).await?;
        info!(%owner, id = %stored.id, position = stored.position, method = enriched.metadata.method, "bookmark created");
        Ok(stored)
    }

    pub async fn get(&self, owner: &OwnerId, id: &Uuid) -> Result<Option<Bookmark>> {
        Ok(self.repository.get_by_id(owner, id).await?)
    }

    pub async fn list(&self, owner: &OwnerId, options: &ListOptions) -> Result<BookmarkPage> {
        Ok(self.repository.list(owner, options).await?)
    }

    pub async fn delete(&self, owner: &OwnerId, id: &Uuid) -> Result<()> {
        self.repository.delete(owner, id).await?;
        info!(%owner, %id, "bookmark deleted");
        Ok(())
    }

    /// Replace a bookmark's tags. Raw input is normalized first — no raw
    /// tag text is ever persisted. Returns the normalized list.
    pub async fn update_tags(
        &self,
        owner: &OwnerId,
        id: &Uuid,
        raw_tags: &[String],
    ) -> Result<Vec<String>> {
        let tags = normalize_tags(raw_tags);
        self.repository.update_tags(owner, id, &tags).await?;
        Ok(tags)
    }

    /// Persist a caller-computed display order as dense positions.
    pub async fn reorder(&self, owner: &OwnerId, ordered_ids: &[Uuid]) -> Result<()> {
        let updates = assign_positions_for_ids(ordered_ids);
        self.repository.bulk_reorder(owner, &updates).await?;
        debug!(%owner, count = updates.len(), "bookmarks reordered");
        Ok(())
    }

    /// Optimistic reorder: move one bookmark within a local display list,
    /// persist the resulting order, and restore the prior order if the
    /// store rejects it. The local list always reflects a persisted
    /// state when this returns.
    pub async fn reorder_or_revert(
        &self,
        owner: &OwnerId,
        local_order: &mut Vec<Bookmark>,
        from: usize,
        to: usize,
    ) -> Result<()> {
        let prior = local_order.clone();
        move_item(local_order, from, to);

        let refs: Vec<&Bookmark> = local_order.iter().collect();
        let updates = assign_positions(&refs);

        match self.repository.bulk_reorder(owner, &updates).await {
            Ok(()) => {
                for (bookmark, update) in local_order.iter_mut().zip(&updates) {
                    bookmark.position = update.position;
                }
                Ok(())
            }
            Err(e) => {
                warn!(%owner, error = %e, "reorder failed, reverting local order");
                *local_order = prior;
                Err(e.into())
            }
        }
    }

    /// Search the owner's collection; filtering and ranking run
    /// client-side over the full row set.
    pub async fn search(&self, owner: &OwnerId, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        let bookmarks = self.repository.list_all(owner).await?;
        Ok(search_bookmarks(&bookmarks, query, Utc::now()))
    }

    pub async fn analytics(&self, owner: &OwnerId) -> Result<AnalyticsReport> {
        let bookmarks = self.repository.list_all(owner).await?;
        Ok(analyze(&bookmarks, Utc::now()))
    }

    pub async fn count(&self, owner: &OwnerId) -> Result<usize> {
        Ok(self.repository.count(owner).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use data_access::DatabaseManager;
    use enrichment::EnrichmentConfig;
    use linkmark_core::{codes, LinkmarkError, PositionUpdate, StoreError};

    /// Pipeline with no network strategies: everything resolves through
    /// the offline fallback synthesizer.
    fn offline_pipeline() -> Arc<EnrichmentPipeline> {
        Arc::new(EnrichmentPipeline::with_strategies(
            vec![],
            vec![],
            EnrichmentConfig::default(),
        ))
    }

    async fn service() -> BookmarkService {
        let db = DatabaseManager::in_memory().await.unwrap();
        BookmarkService::new(Arc::new(db.bookmark_repository()), offline_pipeline())
    }

    #[tokio::test]
    async fn test_create_normalizes_url_and_tags() {
        let service = service().await;
        let owner = OwnerId::new("owner-1");

        let stored = service
            .create(
                &owner,
                "https://example.com/foo-bar?utm_source=x",
                &["Work".to_string(), "work".to_string(), " TODO ".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(stored.url, "https://example.com/foo-bar");
        assert_eq!(stored.tags, vec!["work".to_string(), "todo".to_string()]);
        assert_eq!(stored.position, 1);
    }

    #[tokio::test]
    async fn test_create_with_exhausted_strategies_uses_fallback() {
        let service = service().await;
        let owner = OwnerId::new("owner-1");

        let stored = service
            .create(&owner, "https://unknownsite.example/page1", &[])
            .await
            .unwrap();

        assert!(stored.title.starts_with("Unknownsite"));
        assert!(stored.summary.contains("unknownsite.example"));
        assert!(!stored.favicon.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url_before_enrichment() {
        let service = service().await;
        let owner = OwnerId::new("owner-1");

        let err = service.create(&owner, "not a url", &[]).await.unwrap_err();
        assert!(matches!(err, LinkmarkError::Input { .. }));
    }

    #[tokio::test]
    async fn test_sequential_creates_increment_position() {
        let service = service().await;
        let owner = OwnerId::new("owner-1");

        for expected in 1..=3 {
            let stored = service
                .create(&owner, &format!("https://example.com/{}", expected), &[])
                .await
                .unwrap();
            assert_eq!(stored.position, expected);
        }
    }

    #[tokio::test]
    async fn test_reorder_moves_item_to_front() {
        let service = service().await;
        let owner = OwnerId::new("owner-1");

        let a = service.create(&owner, "https://example.com/a", &[]).await.unwrap();
        let b = service.create(&owner, "https://example.com/b", &[]).await.unwrap();
        let c = service.create(&owner, "https://example.com/c", &[]).await.unwrap();

        let mut local = vec![a.clone(), b.clone(), c.clone()];
        service
            .reorder_or_revert(&owner, &mut local, 2, 0)
            .await
            .unwrap();

        assert_eq!(
            local.iter().map(|x| x.id).collect::<Vec<_>>(),
            vec![c.id, a.id, b.id]
        );

        let page = service.list(&owner, &ListOptions::default()).await.unwrap();
        let stored: Vec<(Uuid, i64)> = page.items.iter().map(|x| (x.id, x.position)).collect();
        assert_eq!(stored, vec![(c.id, 1), (a.id, 2), (b.id, 3)]);
    }

    /// Repository stub whose bulk_reorder always fails.
    struct RejectingRepository;

    #[async_trait]
    impl BookmarkRepository for RejectingRepository {
        async fn insert(&self, bookmark: &Bookmark) -> std::result::Result<Bookmark, StoreError> {
            Ok(bookmark.clone())
        }
        async fn get_by_id(
            &self,
            _owner: &OwnerId,
            _id: &Uuid,
        ) -> std::result::Result<Option<Bookmark>, StoreError> {
            Ok(None)
        }
        async fn list(
            &self,
            _owner: &OwnerId,
            _options: &ListOptions,
        ) -> std::result::Result<BookmarkPage, StoreError> {
            Ok(BookmarkPage {
                items: vec![],
                total: 0,
                has_more: false,
            })
        }
        async fn list_all(&self, _owner: &OwnerId) -> std::result::Result<Vec<Bookmark>, StoreError> {
            Ok(vec![])
        }
        async fn delete(&self, _owner: &OwnerId, _id: &Uuid) -> std::result::Result<(), StoreError> {
            Ok(())
        }
        async fn update_tags(
            &self,
            _owner: &OwnerId,
            _id: &Uuid,
            _tags: &[String],
        ) -> std::result::Result<(), StoreError> {
            Ok(())
        }
        async fn max_position(&self, _owner: &OwnerId) -> std::result::Result<i64, StoreError> {
            Ok(0)
        }
        async fn bulk_reorder(
            &self,
            _owner: &OwnerId,
            _updates: &[PositionUpdate],
        ) -> std::result::Result<(), StoreError> {
            Err(StoreError::backend(
                codes::REORDER_BOOKMARKS_FAILED,
                "write rejected",
            ))
        }
        async fn count(&self, _owner: &OwnerId) -> std::result::Result<usize, StoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_failed_reorder_reverts_local_order() {
        let service = BookmarkService::new(Arc::new(RejectingRepository), offline_pipeline());
        let owner = OwnerId::new("owner-1");

        let make = |url: &str, position: i64| Bookmark {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            url: url.to_string(),
            title: String::new(),
            favicon: String::new(),
            summary: String::new(),
            tags: vec![],
            position,
            created_at: Utc::now(),
        };
        let original = vec![
            make("https://example.com/a", 1),
            make("https://example.com/b", 2),
            make("https://example.com/c", 3),
        ];

        let mut local = original.clone();
        let err = service
            .reorder_or_revert(&owner, &mut local, 2, 0)
            .await
            .unwrap_err();

        assert!(matches!(err, LinkmarkError::Store { .. }));
        assert_eq!(
            local.iter().map(|x| x.id).collect::<Vec<_>>(),
            original.iter().map(|x| x.id).collect::<Vec<_>>()
        );
        assert_eq!(
            local.iter().map(|x| x.position).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn test_update_tags_renormalizes() {
        let service = service().await;
        let owner = OwnerId::new("owner-1");

        let stored = service
            .create(&owner, "https://example.com/a", &[])
            .await
            .unwrap();

        let tags = service
            .update_tags(
                &owner,
                &stored.id,
                &["Rust ".to_string(), "RUST".to_string(), "ok_tag".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(tags, vec!["rust".to_string(), "ok_tag".to_string()]);

        let fetched = service.get(&owner, &stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.tags, tags);
    }

    #[tokio::test]
    async fn test_search_scopes_to_owner_rows() {
        let service = service().await;
        let alice = OwnerId::new("alice");
        let bob = OwnerId::new("bob");

        service
            .create(&alice, "https://go.dev/tutorial", &["go".to_string()])
            .await
            .unwrap();
        service
            .create(&bob, "https://go.dev/tutorial", &["go".to_string()])
            .await
            .unwrap();

        let results = service
            .search(&alice, &SearchQuery::text("tutorial"))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].bookmark.owner, alice);
    }
}
