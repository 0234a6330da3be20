//! Tag normalization
//!
//! Raw user tag text is never persisted unmodified; every write path runs
//! through [`normalize_tags`].

/// Maximum number of tags kept per bookmark
pub const MAX_TAGS: usize = 15;

/// Maximum length of a single tag after trimming
pub const MAX_TAG_LEN: usize = 40;

/// Normalize a raw tag list: trim, lower-case, drop empty / over-length /
/// charset-violating entries, deduplicate preserving first-seen order, and
/// cap the list at [`MAX_TAGS`].
///
/// Pure and idempotent: `normalize_tags(normalize_tags(x)) == normalize_tags(x)`.
pub fn normalize_tags<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut clean = Vec::new();

    for tag in raw {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() || tag.len() > MAX_TAG_LEN {
            continue;
        }
        if !is_valid_tag(&tag) {
            continue;
        }
        if seen.insert(tag.clone()) {
            clean.push(tag);
        }
        if clean.len() == MAX_TAGS {
            break;
        }
    }

    clean
}

/// A tag may contain ASCII alphanumerics, spaces, hyphens, and underscores.
fn is_valid_tag(tag: &str) -> bool {
    tag.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
}
