//! Collection analytics
//!
//! Aggregates over the owner's full collection: fixed-window counts,
//! top tag and domain frequencies, and a zero-filled daily activity
//! histogram for the trailing 30 days.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use linkmark_core::urlnorm::display_host;
use linkmark_core::Bookmark;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of top tags / domains reported
const TOP_N: usize = 5;

/// Days covered by the activity histogram
const ACTIVITY_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

/// One day of creation activity; days with no creations are present
/// with a zero count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total: usize,
    pub last_7_days: usize,
    pub last_30_days: usize,
    pub top_tags: Vec<TagCount>,
    pub top_domains: Vec<DomainCount>,
    /// Oldest day first, exactly [`ACTIVITY_DAYS`] entries
    pub daily_activity: Vec<DailyActivity>,
}

/// Aggregate an owner's bookmarks as of `now`.
pub fn analyze(bookmarks: &[Bookmark], now: DateTime<Utc>) -> AnalyticsReport {
    let week_ago = now - Duration::days(7);
    let month_ago = now - Duration::days(30);

    let last_7_days = bookmarks.iter().filter(|b| b.created_at >= week_ago).count();
    let last_30_days = bookmarks
        .iter()
        .filter(|b| b.created_at >= month_ago)
        .count();

    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    for bookmark in bookmarks {
        for tag in &bookmark.tags {
            *tag_counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    let top_tags = top_n(tag_counts)
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();

    let mut domain_counts: HashMap<String, usize> = HashMap::new();
    for bookmark in bookmarks {
        if let Some(domain) = display_host(&bookmark.url) {
            *domain_counts.entry(domain).or_default() += 1;
        }
    }
    let top_domains = top_n(domain_counts)
        .into_iter()
        .map(|(domain, count)| DomainCount { domain, count })
        .collect();

    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for bookmark in bookmarks {
        *per_day.entry(bookmark.created_at.date_naive()).or_default() += 1;
    }
    let daily_activity = (0..ACTIVITY_DAYS)
        .rev()
        .map(|offset| {
            let date = (now - Duration::days(offset)).date_naive();
            DailyActivity {
                date,
                count: per_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect();

    AnalyticsReport {
        total: bookmarks.len(),
        last_7_days,
        last_30_days,
        top_tags,
        top_domains,
        daily_activity,
    }
}

/// Highest counts first, ties broken alphabetically for stable output.
fn top_n<K: Ord + std::hash::Hash>(counts: HashMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(TOP_N);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmark_core::OwnerId;
    use uuid::Uuid;

    fn bookmark(url: &str, tags: &[&str], age_days: i64) -> Bookmark {
        Bookmark {
            id: Uuid::new_v4(),
            owner: OwnerId::new("owner-1"),
            url: url.to_string(),
            title: "Title".to_string(),
            favicon: String::new(),
            summary: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            position: 1,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[test]
    fn test_window_counts() {
        let items = vec![
            bookmark("https://a.example", &[], 1),
            bookmark("https://b.example", &[], 10),
            bookmark("https://c.example", &[], 60),
        ];
        let report = analyze(&items, Utc::now());

        assert_eq!(report.total, 3);
        assert_eq!(report.last_7_days, 1);
        assert_eq!(report.last_30_days, 2);
    }

    #[test]
    fn test_top_tags_ordered_by_frequency() {
        let items = vec![
            bookmark("https://a.example", &["rust", "async"], 1),
            bookmark("https://b.example", &["rust"], 1),
            bookmark("https://c.example", &["db"], 1),
        ];
        let report = analyze(&items, Utc::now());

        assert_eq!(report.top_tags[0].tag, "rust");
        assert_eq!(report.top_tags[0].count, 2);
        assert_eq!(report.top_tags.len(), 3);
    }

    #[test]
    fn test_top_domains_strip_www() {
        let items = vec![
            bookmark("https://www.example.com/a", &[], 1),
            bookmark("https://example.com/b", &[], 1),
            bookmark("https://docs.rs/tokio", &[], 1),
        ];
        let report = analyze(&items, Utc::now());

        assert_eq!(report.top_domains[0].domain, "example.com");
        assert_eq!(report.top_domains[0].count, 2);
    }

    #[test]
    fn test_daily_activity_zero_filled() {
        let items = vec![
            bookmark("https://a.example", &[], 0),
            bookmark("https://b.example", &[], 0),
            bookmark("https://c.example", &[], 3),
        ];
        let now = Utc::now();
        let report = analyze(&items, now);

        assert_eq!(report.daily_activity.len(), 30);
        let today = report.daily_activity.last().unwrap();
        assert_eq!(today.date, now.date_naive());
        assert_eq!(today.count, 2);

        let quiet_days = report
            .daily_activity
            .iter()
            .filter(|d| d.count == 0)
            .count();
        assert_eq!(quiet_days, 28);
    }

    #[test]
    fn test_empty_collection() {
        let report = analyze(&[], Utc::now());
        assert_eq!(report.total, 0);
        assert!(report.top_tags.is_empty());
        assert!(report.top_domains.is_empty());
        assert_eq!(report.daily_activity.len(), 30);
    }
}
