//! Offline fallback synthesizer
//!
//! The guaranteed terminal case of both extraction pipelines: a title and
//! summary derived purely from URL structure. Total and side-effect-free —
//! URL-parse failure yields fixed generic strings, never an error.

use url::Url;

/// Favicon service URL template used when no icon can be scraped
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Favicon size requested from the service
const FAVICON_SIZE: u32 = 64;

/// Title returned when the URL cannot be parsed at all
const GENERIC_TITLE: &str = "Saved Link";

/// Maximum combined title length before the path suffix is dropped
const MAX_TITLE_WITH_SUFFIX: usize = 50;

/// One-sentence context per well-known domain, matched by hostname
/// substring. First match wins.
const DOMAIN_CONTEXTS: &[(&str, &str)] = &[
    ("github.", "A code hosting and collaboration platform"),
    ("gitlab.", "A code hosting and DevOps platform"),
    ("stackoverflow.", "A question and answer community for programmers"),
    ("youtube.", "A video sharing platform"),
    ("vimeo.", "A video sharing platform"),
    ("wikipedia.", "A collaborative online encyclopedia"),
    ("reddit.", "A community discussion and link aggregation site"),
    ("news.ycombinator.com", "A technology and startup news aggregator"),
    ("medium.", "An online publishing platform for essays and articles"),
    ("twitter.", "A social media and microblogging platform"),
    ("linkedin.", "A professional networking platform"),
    ("docs.rs", "Rust crate API documentation"),
    ("crates.io", "The Rust community package registry"),
    ("arxiv.org", "An open-access archive of scholarly preprints"),
];

/// Synthesize a display title from the URL structure alone.
///
/// Hostname minus `www.`, first label title-cased; the final path segment
/// (extension stripped, `-`/`_` replaced with spaces, words title-cased)
/// is appended when the combined length stays short enough.
pub fn fallback_title(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return GENERIC_TITLE.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return GENERIC_TITLE.to_string();
    };

    let host = host.strip_prefix("www.").unwrap_or(host);
    let base = title_case_word(host.split('.').next().unwrap_or(host));
    if base.is_empty() {
        return GENERIC_TITLE.to_string();
    }

    if let Some(segment) = last_path_segment(&parsed) {
        let candidate = format!("{} - {}", base, humanize_segment(&segment));
        if candidate.len() <= MAX_TITLE_WITH_SUFFIX {
            return candidate;
        }
    }

    base
}

/// Synthesize a summary sentence from the hostname and the static
/// domain-context table.
pub fn fallback_summary(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()));

    let Some(host) = host else {
        return "Content saved for future reference.".to_string();
    };

    let display = host.strip_prefix("www.").unwrap_or(&host);
    match DOMAIN_CONTEXTS
        .iter()
        .find(|(needle, _)| host.contains(needle))
    {
        Some((_, context)) => format!(
            "{}. This bookmark contains saved content from {} for future reference.",
            context, display
        ),
        None => format!(
            "This bookmark contains saved content from {} for future reference.",
            display
        ),
    }
}

/// Favicon-service URL for the given page URL, used whenever no icon can
/// be scraped from the page itself.
pub fn favicon_url_for(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default();
    format!("{}?domain={}&sz={}", FAVICON_SERVICE, host, FAVICON_SIZE)
}

fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()?
        .to_string();
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

fn humanize_segment(segment: &str) -> String {
    let stem = match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() <= 5 => stem,
        _ => segment,
    };
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
