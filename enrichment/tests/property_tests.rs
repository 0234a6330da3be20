// Property: the fallback synthesizer is total.
//
// For any input string — well-formed URL or complete garbage — the
// fallback title and summary functions return a non-empty string and
// never panic. They are the guaranteed terminal case of both extraction
// pipelines, so totality is load-bearing.

use proptest::prelude::*;
use enrichment::{fallback_summary, fallback_title, favicon_url_for};

// Strategy mixing plausible URLs with arbitrary noise
fn arb_url_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "https?://[a-z0-9.-]{1,30}\\.[a-z]{2,4}(/[a-zA-Z0-9._~-]{0,20}){0,4}",
        "[a-z]{1,10}://[ -~]{0,40}",
        ".{0,60}",
        Just(String::new()),
        Just("https://".to_string()),
        Just("http://?#".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// fallback_title never panics and never returns an empty string.
    #[test]
    fn prop_fallback_title_total(input in arb_url_like()) {
        let title = fallback_title(&input);
        prop_assert!(!title.is_empty());
    }

    /// fallback_summary never panics, never returns an empty string, and
    /// always reads as a reference sentence.
    #[test]
    fn prop_fallback_summary_total(input in arb_url_like()) {
        let summary = fallback_summary(&input);
        prop_assert!(!summary.is_empty());
        prop_assert!(summary.contains("reference"));
    }

    /// The favicon service URL is always well-formed enough to render.
    #[test]
    fn prop_favicon_url_total(input in arb_url_like()) {
        let favicon = favicon_url_for(&input);
        prop_assert!(favicon.starts_with("https://"));
        prop_assert!(favicon.contains("domain="));
    }
}

#[test]
fn fallback_title_uses_domain_for_unknown_sites() {
    assert!(fallback_title("https://unknownsite.example/page1").starts_with("Unknownsite"));
}

#[test]
fn fallback_summary_names_the_domain() {
    let summary = fallback_summary("https://unknownsite.example/page1");
    assert!(summary.contains("unknownsite.example"));
}
