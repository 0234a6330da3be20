//! URL validation and normalization
//!
//! Bookmarked URLs are stored normalized: http/https only, tracking query
//! parameters stripped, fragment dropped. Validation happens before any
//! network call so malformed input fails fast.

use url::Url;

use crate::errors::InputError;

/// Query parameters stripped on write. Exact names plus the `utm_` prefix.
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "gclsrc", "dclid", "msclkid", "mc_cid", "mc_eid",
    "igshid", "yclid", "twclid", "ref_src", "s_kwcid",
];

fn is_tracking_param(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.starts_with("utm_") || TRACKING_PARAMS.contains(&name.as_str())
}

/// Parse and normalize a user-supplied URL.
///
/// Fails with [`InputError`] on malformed input or non-http(s) schemes;
/// succeeds with the canonical string otherwise.
pub fn normalize_url(raw: &str) -> Result<String, InputError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| InputError::InvalidUrl {
        details: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(InputError::UnsupportedScheme {
                scheme: other.to_string(),
            })
        }
    }

    if url.host_str().is_none() {
        return Err(InputError::InvalidUrl {
            details: "missing host".to_string(),
        });
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    url.set_fragment(None);

    Ok(url.to_string())
}

/// Hostname of an already-normalized URL with a leading `www.` stripped,
/// used for favicon lookup and domain analytics. Returns `None` when the
/// string does not parse (callers treat that as "no domain").
pub fn display_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
