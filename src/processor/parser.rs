//! HTML parsing: word tallies and same-host link extraction
//!
//! Words are the runs of ASCII letters in the page's visible text, lowercased,
//! with anything inside `<script>`, `<style>`, and `<noscript>` ignored. Only
//! words meeting the configured minimum length are tallied; there is no upper
//! bound on word length.
//!
//! Links come from `a[href]` only. Excluded: `javascript:`, `mailto:`,
//! `tel:`, `data:` schemes, fragment-only anchors, anchors carrying the
//! `download` attribute, and anything that resolves off the target host.

use crate::processor::PageData;
use crate::url::is_same_host;
use regex::Regex;
use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

/// Parses one page into its word tallies and same-host links
///
/// # Arguments
///
/// * `html` - The page body
/// * `base_url` - The page's own URL, for resolving relative links
/// * `target` - The crawl target host, as produced by [`crate::url::target_host`]
/// * `word_re` - The word tokenizer, compiled once per run
/// * `min_len` - Minimum word length to tally
pub fn parse_page(
    html: &str,
    base_url: &Url,
    target: &str,
    word_re: &Regex,
    min_len: usize,
) -> PageData {
    let document = Html::parse_document(html);

    let mut text = String::new();
    collect_visible_text(document.tree.root(), &mut text);

    let words = tally_words(&text, word_re, min_len);
    let links = extract_links(&document, base_url, target);

    PageData { words, links }
}

/// Walks the DOM collecting text nodes, skipping non-rendered subtrees
fn collect_visible_text(node: NodeRef<Node>, out: &mut String) {
    if let Node::Element(element) = node.value() {
        if matches!(element.name(), "script" | "style" | "noscript") {
            return;
        }
    }

    if let Node::Text(text) = node.value() {
        out.push_str(&text);
        out.push(' ');
    }

    for child in node.children() {
        collect_visible_text(child, out);
    }
}

/// Tallies words of at least `min_len` characters, lowercased
fn tally_words(text: &str, word_re: &Regex, min_len: usize) -> HashMap<String, u64> {
    let mut words = HashMap::new();
    for found in word_re.find_iter(text) {
        let word = found.as_str().to_lowercase();
        if word.len() >= min_len {
            *words.entry(word).or_insert(0) += 1;
        }
    }
    words
}

/// Extracts absolute same-host links from anchor tags
fn extract_links(document: &Html, base_url: &Url, target: &str) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url, target) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute on-host URL, or None if it is excluded
fn resolve_link(href: &str, base_url: &Url, target: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;

    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    if !is_same_host(&absolute, target) {
        return None;
    }

    // Fragments never change the fetched document; strip them so the same
    // page does not enter the visited set under several keys.
    absolute.set_fragment(None);

    Some(absolute.to_string())
}

/// The default word tokenizer: maximal runs of ASCII letters
pub fn word_regex() -> Regex {
    // The pattern is static, so compilation cannot fail.
    Regex::new(r"[A-Za-z]+").expect("static word regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> PageData {
        let base = Url::parse("https://example.com/page").unwrap();
        parse_page(html, &base, "example.com", &word_regex(), 5)
    }

    #[test]
    fn test_words_meeting_min_length_are_tallied() {
        let page = parse("<html><body>sesquipedalian words and sesquipedalian prose</body></html>");
        assert_eq!(page.words.get("sesquipedalian"), Some(&2));
        assert_eq!(page.words.get("words"), Some(&1));
    }

    #[test]
    fn test_short_words_are_dropped() {
        let page = parse("<html><body>tiny little words</body></html>");
        assert_eq!(page.words.get("tiny"), None);
        assert_eq!(page.words.get("little"), Some(&1));
    }

    #[test]
    fn test_words_are_lowercased() {
        let page = parse("<html><body>Gigantic GIGANTIC gigantic</body></html>");
        assert_eq!(page.words.get("gigantic"), Some(&3));
        assert_eq!(page.words.get("Gigantic"), None);
    }

    #[test]
    fn test_script_and_style_text_ignored() {
        let page = parse(
            "<html><head><style>considerable { display: none }</style>\
             <script>var considerable = 1;</script></head>\
             <body>visible</body></html>",
        );
        assert_eq!(page.words.get("considerable"), None);
        assert_eq!(page.words.get("visible"), Some(&1));
    }

    #[test]
    fn test_punctuation_splits_words() {
        let page = parse("<html><body>crawler,crawler;crawler</body></html>");
        assert_eq!(page.words.get("crawler"), Some(&3));
    }

    #[test]
    fn test_relative_link_resolved_to_host() {
        let page = parse(r#"<html><body><a href="/other">x</a></body></html>"#);
        assert_eq!(page.links, vec!["https://example.com/other".to_string()]);
    }

    #[test]
    fn test_off_host_link_dropped() {
        let page = parse(r#"<html><body><a href="https://other.com/page">x</a></body></html>"#);
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_www_variant_kept() {
        let page =
            parse(r#"<html><body><a href="https://www.example.com/about">x</a></body></html>"#);
        assert_eq!(page.links, vec!["https://www.example.com/about".to_string()]);
    }

    #[test]
    fn test_special_schemes_dropped() {
        let page = parse(
            r#"<html><body>
            <a href="javascript:void(0)">a</a>
            <a href="mailto:x@example.com">b</a>
            <a href="tel:+123">c</a>
            <a href="data:text/html,hi">d</a>
            </body></html>"#,
        );
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_fragment_only_and_download_dropped() {
        let page = parse(
            r##"<html><body>
            <a href="#section">a</a>
            <a href="/file.pdf" download>b</a>
            </body></html>"##,
        );
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_fragment_stripped_from_link() {
        let page = parse(r##"<html><body><a href="/doc#part2">x</a></body></html>"##);
        assert_eq!(page.links, vec!["https://example.com/doc".to_string()]);
    }
}
