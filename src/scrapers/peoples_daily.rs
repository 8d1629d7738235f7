//! People's Daily English listing-page link extraction.
//!
//! Listing pages link articles with absolute `people.com.cn` URLs; each
//! anchor is usually followed by a `div.abs` snippet element holding the
//! article's first sentences. An anchor matches when the target keyword
//! appears in its text or in that snippet.
//!
//! Deduplication is exact-string over the href, shared across pages through
//! the session's seen set.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info};

const ARTICLE_LINK_SELECTOR: &str = r#"a[href*="people.com.cn"]"#;

/// Extract keyword-matched article URLs from one listing page.
///
/// Returns hrefs not yet in `seen` whose anchor text or adjacent snippet
/// contains `keyword`, and inserts them into `seen`.
pub fn extract_article_links(html: &str, keyword: &str, seen: &mut HashSet<String>) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse(ARTICLE_LINK_SELECTOR).unwrap();

    let mut article_links = Vec::new();
    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if seen.contains(href) {
            continue;
        }

        let anchor_text = element.text().collect::<Vec<_>>().join(" ");
        let matched = anchor_text.contains(keyword)
            || adjacent_snippet_text(element).is_some_and(|snippet| snippet.contains(keyword));

        if matched {
            article_links.push(href.to_string());
            seen.insert(href.to_string());
        }
    }

    info!(count = article_links.len(), "Extracted keyword-matched article URLs");
    debug!(urls = ?article_links, "Matched URLs");
    article_links
}

/// Text of the first `div.abs` element following the anchor in document order.
///
/// Walks the successor chain (first child, else next sibling, else the
/// nearest ancestor's next sibling) until a snippet element or the end of
/// the document.
fn adjacent_snippet_text(anchor: ElementRef) -> Option<String> {
    let mut node = *anchor;
    loop {
        node = if let Some(child) = node.first_child() {
            child
        } else {
            let mut current = node;
            loop {
                if let Some(sibling) = current.next_sibling() {
                    break sibling;
                }
                current = current.parent()?;
            }
        };

        if let Some(element) = ElementRef::wrap(node) {
            let value = element.value();
            let is_snippet = value.name() == "div"
                && value
                    .attr("class")
                    .is_some_and(|classes| classes.split_whitespace().any(|c| c == "abs"));
            if is_snippet {
                return Some(element.text().collect::<Vec<_>>().join(" "));
            }
        }
    }
}
