//! Extraction of results from DuckDuckGo's HTML page.

use std::sync::OnceLock;

use regex::Regex;

use crate::SearchResult;

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<a\b([^>]*\bclass="[^"]*\bresult__a\b[^"]*"[^>]*)>(.*?)</a>"#)
            .expect("valid link regex")
    })
}

fn href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\bhref="([^"]*)""#).expect("valid href regex"))
}

fn snippet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<(a|div|td)\b[^>]*\bclass="[^"]*\bresult__snippet\b[^"]*"[^>]*>(.*?)</(?:a|div|td)>"#,
        )
        .expect("valid snippet regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag regex"))
}

/// Parses result blocks in page order.
///
/// Each `result__a` link starts a block; the first `result__snippet` before the next link is
/// its snippet (the link title is used when a block has none). Ad links and blocks without a
/// usable URL are skipped.
pub fn parse_results(html: &str) -> Vec<SearchResult> {
    let links: Vec<(usize, usize, String, String)> = link_re()
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let href = href_re().captures(caps.get(1)?.as_str())?.get(1)?.as_str();
            let title = clean_text(caps.get(2)?.as_str());
            Some((whole.start(), whole.end(), href.to_string(), title))
        })
        .collect();

    let mut results = Vec::new();
    for (i, (_, end, href, title)) in links.iter().enumerate() {
        let block_end = links.get(i + 1).map(|l| l.0).unwrap_or(html.len());
        let Some(url) = resolve_url(href) else {
            continue;
        };
        if is_ad(&url) {
            continue;
        }
        let snippet = snippet_re()
            .captures(&html[*end..block_end])
            .and_then(|c| c.get(2))
            .map(|m| clean_text(m.as_str()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| title.clone());
        if snippet.is_empty() {
            continue;
        }
        results.push(SearchResult::new(snippet, url));
    }
    results
}

/// Unwraps DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=<encoded>&rut=...`) and
/// makes protocol-relative URLs absolute. Returns `None` for empty or non-http targets.
fn resolve_url(href: &str) -> Option<String> {
    let href = decode_entities(href);
    let target = match href.find("uddg=") {
        Some(pos) => {
            let encoded = href[pos + 5..].split('&').next().unwrap_or_default();
            urlencoding::decode(encoded).ok()?.into_owned()
        }
        None => href,
    };
    let target = if let Some(rest) = target.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        target
    };
    if target.starts_with("http://") || target.starts_with("https://") {
        Some(target)
    } else {
        None
    }
}

fn is_ad(url: &str) -> bool {
    url.contains("duckduckgo.com/y.js") || url.contains("ad_provider=")
}

/// Strips tags, decodes common entities and collapses whitespace.
fn clean_text(fragment: &str) -> String {
    let no_tags = tag_re().replace_all(fragment, "");
    decode_entities(&no_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_unwraps_redirect() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rbi.org.in%2Frates%3Fa%3D1&amp;rut=abc";
        assert_eq!(
            resolve_url(href).as_deref(),
            Some("https://www.rbi.org.in/rates?a=1")
        );
    }

    #[test]
    fn test_resolve_url_direct_and_relative() {
        assert_eq!(
            resolve_url("https://example.com/a").as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(
            resolve_url("//example.com/b").as_deref(),
            Some("https://example.com/b")
        );
        assert!(resolve_url("/html/?q=next").is_none());
        assert!(resolve_url("").is_none());
    }

    #[test]
    fn test_clean_text_strips_tags_and_entities() {
        assert_eq!(
            clean_text("Home <b>loan</b> rates &amp; EMI\n   from 8.5%&nbsp;p.a."),
            "Home loan rates & EMI from 8.5% p.a."
        );
    }

    #[test]
    fn test_parse_results_falls_back_to_title() {
        let html = r#"<a rel="nofollow" class="result__a" href="https://example.com">Example &amp; Co</a>"#;
        let results = parse_results(html);
        assert_eq!(results, vec![SearchResult::new("Example & Co", "https://example.com")]);
    }

    #[test]
    fn test_parse_results_empty_page() {
        assert!(parse_results("<html><body>No results.</body></html>").is_empty());
    }
}
