//! Client-side search and relevance ranking
//!
//! Filtering and scoring run over the owner's full collection in memory;
//! the store only supplies the rows. Matching is case-insensitive
//! substring over title/summary/url, with an any-of tag filter and an
//! optional date range. Ranking is a weighted sum by match location plus
//! a linearly decaying recency bonus.

use chrono::{DateTime, Utc};
use linkmark_core::Bookmark;
use serde::{Deserialize, Serialize};

/// Score weight for a query match in the title
const TITLE_WEIGHT: f32 = 10.0;
/// Score weight per matching tag
const TAG_WEIGHT: f32 = 7.0;
/// Score weight for a query match in the URL
const URL_WEIGHT: f32 = 5.0;
/// Score weight for a query match in the summary
const SUMMARY_WEIGHT: f32 = 3.0;
/// Maximum recency bonus, decaying linearly to 0 over the window
const RECENCY_MAX_BONUS: f32 = 5.0;
/// Days over which the recency bonus decays
const RECENCY_WINDOW_DAYS: f32 = 50.0;

/// Search parameters
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Free-text query; empty matches everything
    pub text: String,
    /// Any-of tag containment filter; empty disables the filter
    pub tags: Vec<String>,
    /// Inclusive lower bound on creation time
    pub from_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time
    pub to_date: Option<DateTime<Utc>>,
    /// Per-term matching: every whitespace-separated term must match
    /// somewhere, instead of the query as one substring
    pub fuzzy: bool,
    /// Sort by descending relevance score instead of manual order
    pub ranked: bool,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn ranked(mut self) -> Self {
        self.ranked = true;
        self
    }
}

/// One search hit with its relevance score (0 when ranking was not
/// requested)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub bookmark: Bookmark,
    pub score: f32,
}

/// Filter and optionally rank an owner's bookmarks.
pub fn search_bookmarks(
    bookmarks: &[Bookmark],
    query: &SearchQuery,
    now: DateTime<Utc>,
) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = bookmarks
        .iter()
        .filter(|b| matches(b, query))
        .map(|b| SearchResult {
            score: if query.ranked {
                relevance(b, &query.text, now)
            } else {
                0.0
            },
            bookmark: b.clone(),
        })
        .collect();

    if query.ranked {
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.bookmark.created_at.cmp(&a.bookmark.created_at))
        });
    }

    results
}

fn matches(bookmark: &Bookmark, query: &SearchQuery) -> bool {
    if let Some(from) = query.from_date {
        if bookmark.created_at < from {
            return false;
        }
    }
    if let Some(to) = query.to_date {
        if bookmark.created_at > to {
            return false;
        }
    }

    if !query.tags.is_empty() {
        let wanted: Vec<String> = query.tags.iter().map(|t| t.to_lowercase()).collect();
        if !bookmark.tags.iter().any(|t| wanted.contains(t)) {
            return false;
        }
    }

    let text = query.text.trim().to_lowercase();
    if text.is_empty() {
        return true;
    }

    if query.fuzzy {
        text.split_whitespace().all(|term| matches_term(bookmark, term))
    } else {
        matches_term(bookmark, &text)
    }
}

fn matches_term(bookmark: &Bookmark, term: &str) -> bool {
    bookmark.title.to_lowercase().contains(term)
        || bookmark.summary.to_lowercase().contains(term)
        || bookmark.url.to_lowercase().contains(term)
}

/// Weighted relevance score for one bookmark against a query.
fn relevance(bookmark: &Bookmark, query_text: &str, now: DateTime<Utc>) -> f32 {
    let query = query_text.trim().to_lowercase();
    let mut score = 0.0f32;

    if !query.is_empty() {
        if bookmark.title.to_lowercase().contains(&query) {
            score += TITLE_WEIGHT;
        }
        for tag in &bookmark.tags {
            if tag.contains(&query) {
                score += TAG_WEIGHT;
            }
        }
        if bookmark.url.to_lowercase().contains(&query) {
            score += URL_WEIGHT;
        }
        if bookmark.summary.to_lowercase().contains(&query) {
            score += SUMMARY_WEIGHT;
        }
    }

    score + recency_bonus(bookmark.created_at, now)
}

/// Linear decay from the full bonus at age zero to nothing at the window
/// edge, floored at 0 for older bookmarks.
fn recency_bonus(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f32 {
    let age_days = (now - created_at).num_seconds() as f32 / 86_400.0;
    if age_days < 0.0 {
        return RECENCY_MAX_BONUS;
    }
    (RECENCY_MAX_BONUS * (1.0 - age_days / RECENCY_WINDOW_DAYS)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use linkmark_core::OwnerId;
    use uuid::Uuid;

    fn bookmark(title: &str, summary: &str, url: &str, tags: &[&str], age_days: i64) -> Bookmark {
        Bookmark {
            id: Uuid::new_v4(),
            owner: OwnerId::new("owner-1"),
            url: url.to_string(),
            title: title.to_string(),
            favicon: String::new(),
            summary: summary.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            position: 1,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[test]
    fn test_text_and_tag_filters_combine() {
        let items = vec![
            bookmark("Go tutorial", "Learn Go.", "https://go.dev/tour", &["go"], 1),
            bookmark("Go tutorial", "Learn Go.", "https://go.dev/tour2", &["video"], 1),
            bookmark("Rust book", "Learn Rust.", "https://rust-lang.org", &["go"], 1),
        ];
        let query = SearchQuery::text("tutorial").with_tags(vec!["go".to_string()]);

        let results = search_bookmarks(&items, &query, Utc::now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].bookmark.url, "https://go.dev/tour");
    }

    #[test]
    fn test_ranked_results_order_by_descending_score() {
        let now = Utc::now();
        let items = vec![
            bookmark("Other", "Mentions tutorial once.", "https://a.example", &[], 1),
            bookmark("Tutorial central", "A tutorial site.", "https://tutorial.example", &["tutorial"], 1),
        ];
        let query = SearchQuery::text("tutorial").ranked();

        let results = search_bookmarks(&items, &query, now);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].bookmark.title, "Tutorial central");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_title_match_outweighs_summary_match() {
        let now = Utc::now();
        let in_title = bookmark("Tokio guide", "About async.", "https://a.example", &[], 10);
        let in_summary = bookmark("Async notes", "A tokio walkthrough.", "https://b.example", &[], 10);

        let title_score = relevance(&in_title, "tokio", now);
        let summary_score = relevance(&in_summary, "tokio", now);
        assert!(title_score > summary_score);
    }

    #[test]
    fn test_recency_bonus_decays_and_floors() {
        let now = Utc::now();
        let fresh = recency_bonus(now, now);
        let mid = recency_bonus(now - Duration::days(25), now);
        let old = recency_bonus(now - Duration::days(200), now);

        assert!((fresh - RECENCY_MAX_BONUS).abs() < 0.01);
        assert!(mid > 0.0 && mid < fresh);
        assert_eq!(old, 0.0);
    }

    #[test]
    fn test_fuzzy_requires_every_term() {
        let items = vec![
            bookmark("Rust async book", "", "https://a.example", &[], 1),
            bookmark("Rust cookbook", "", "https://b.example", &[], 1),
        ];
        let query = SearchQuery {
            text: "rust async".to_string(),
            fuzzy: true,
            ..Default::default()
        };

        let results = search_bookmarks(&items, &query, Utc::now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].bookmark.title, "Rust async book");
    }

    #[test]
    fn test_date_range_filter() {
        let items = vec![
            bookmark("Old", "", "https://a.example", &[], 40),
            bookmark("New", "", "https://b.example", &[], 2),
        ];
        let query = SearchQuery {
            from_date: Some(Utc::now() - Duration::days(7)),
            ..Default::default()
        };

        let results = search_bookmarks(&items, &query, Utc::now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].bookmark.title, "New");
    }
}
