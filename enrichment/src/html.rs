//! String-scanning HTML helpers for the extraction strategies
//!
//! Deliberately not a full HTML parser: extraction is best-effort and
//! every caller has a fallback, so lightweight scanning over the raw
//! markup is sufficient.

/// Extract the page title, preferring `<title>` over `og:title`.
pub fn extract_title(html: &str) -> Option<String> {
    if let Some(start) = html.find("<title") {
        if let Some(tag_end) = html[start..].find('>') {
            let content_start = start + tag_end + 1;
            if let Some(end) = html[content_start..].find("</title>") {
                let title = decode_entities(html[content_start..content_start + end].trim());
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }

    extract_og_content(html, "title")
}

/// Extract `<meta name="..." content="...">` by name.
pub fn extract_meta_content(html: &str, name: &str) -> Option<String> {
    let patterns = [
        format!(r#"<meta name="{}" content=""#, name),
        format!(r#"<meta name='{}' content='"#, name),
        format!(r#"<meta content="" name="{}""#, name),
        format!(r#"<meta content='' name='{}'"#, name),
    ];
    scan_patterns(html, &patterns)
}

/// Extract `<meta property="og:..." content="...">` by Open Graph property.
pub fn extract_og_content(html: &str, property: &str) -> Option<String> {
    let og_property = format!("og:{}", property);
    let patterns = [
        format!(r#"<meta property="{}" content=""#, og_property),
        format!(r#"<meta property='{}' content='"#, og_property),
        format!(r#"<meta content="" property="{}""#, og_property),
        format!(r#"<meta content='' property='{}'"#, og_property),
    ];
    scan_patterns(html, &patterns)
}

/// Extract the href of a `<link rel="icon">`-family tag.
pub fn extract_link_icon(html: &str) -> Option<String> {
    let html_lower = html.to_lowercase();
    let mut pos = 0;
    while let Some(start) = html_lower[pos..].find("<link") {
        let link_start = pos + start;
        let Some(end) = html_lower[link_start..].find('>') else {
            break;
        };
        let tag = &html[link_start..link_start + end + 1];
        let rel = extract_attribute(tag, "rel").unwrap_or_default().to_lowercase();
        if rel.split_whitespace().any(|r| r == "icon" || r == "shortcut" || r == "apple-touch-icon") {
            if let Some(href) = extract_attribute(tag, "href") {
                if !href.is_empty() {
                    return Some(href);
                }
            }
        }
        pos = link_start + end + 1;
    }
    None
}

/// Strip tags, scripts, and styles, returning whitespace-collapsed text.
pub fn extract_text_content(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;

    let html_lower = html.to_lowercase();
    let chars: Vec<char> = html.chars().collect();
    let chars_lower: Vec<char> = html_lower.chars().collect();

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '<' {
            let remaining: String = chars_lower[i..].iter().take(10).collect();
            if remaining.starts_with("<script") {
                in_script = true;
            } else if remaining.starts_with("</script") {
                in_script = false;
            } else if remaining.starts_with("<style") {
                in_style = true;
            } else if remaining.starts_with("</style") {
                in_style = false;
            }
            in_tag = true;
        } else if chars[i] == '>' {
            in_tag = false;
        } else if !in_tag && !in_script && !in_style {
            text.push(chars[i]);
        }
        i += 1;
    }

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    decode_entities(&text)
}

/// Extract an attribute value from a single tag string.
pub fn extract_attribute(tag: &str, attr: &str) -> Option<String> {
    let patterns = [format!(r#"{}=""#, attr), format!(r#"{}='"#, attr)];

    for pattern in &patterns {
        if let Some(start) = tag.to_lowercase().find(&pattern.to_lowercase()) {
            let quote_char = if pattern.contains('"') { '"' } else { '\'' };
            let content_start = start + pattern.len();
            if let Some(end) = tag[content_start..].find(quote_char) {
                return Some(tag[content_start..content_start + end].to_string());
            }
        }
    }
    None
}

/// Decode the common HTML entities seen in titles and descriptions.
pub fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&mdash;", "\u{2014}")
        .replace("&ndash;", "\u{2013}")
        .replace("&hellip;", "\u{2026}")
}

fn scan_patterns(html: &str, patterns: &[String]) -> Option<String> {
    let html_lower = html.to_lowercase();
    for pattern in patterns {
        if let Some(start) = html_lower.find(&pattern.to_lowercase()) {
            let quote_char = if pattern.contains('"') { '"' } else { '\'' };
            let content_start = start + pattern.len();
            if let Some(end) = html[content_start..].find(quote_char) {
                let content = decode_entities(html[content_start..content_start + end].trim());
                if !content.is_empty() {
                    return Some(content);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_tag() {
        let html = "<html><head><title>Rust &amp; Friends</title></head></html>";
        assert_eq!(extract_title(html), Some("Rust & Friends".to_string()));
    }

    #[test]
    fn test_extract_title_falls_back_to_og() {
        let html = r#"<head><title></title><meta property="og:title" content="OG Title"></head>"#;
        assert_eq!(extract_title(html), Some("OG Title".to_string()));
    }

    #[test]
    fn test_extract_meta_description() {
        let html = r#"<meta name="description" content="A page about things">"#;
        assert_eq!(
            extract_meta_content(html, "description"),
            Some("A page about things".to_string())
        );
    }

    #[test]
    fn test_extract_link_icon() {
        let html = r#"<link rel="stylesheet" href="/a.css"><link rel="shortcut icon" href="/favicon.png">"#;
        assert_eq!(extract_link_icon(html), Some("/favicon.png".to_string()));
    }

    #[test]
    fn test_extract_text_skips_script_and_style() {
        let html = "<body><script>var x = 1;</script><style>p{}</style><p>Hello   world</p></body>";
        assert_eq!(extract_text_content(html), "Hello world");
    }

    #[test]
    fn test_missing_pieces_return_none() {
        assert_eq!(extract_title("<p>no title</p>"), None);
        assert_eq!(extract_link_icon("<p>no icon</p>"), None);
        assert_eq!(extract_meta_content("<p></p>", "description"), None);
    }
}
