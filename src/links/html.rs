// src/links/html.rs
// =============================================================================
// This module extracts raw link targets from HTML markup.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from malformed markup instead of
//   failing, so a broken page simply yields fewer links
//
// Unlike a link checker we do NOT resolve or filter anything here. Every
// href is returned verbatim (including empty ones), in document order, with
// duplicates kept.
// =============================================================================

use scraper::{Html, Selector};

// Elements that carry a navigable href
const ANCHOR_SELECTOR: &str = "a[href], area[href]";

// Extracts every href attribute value from anchor-like elements
//
// Parameters:
//   markup: the rendered HTML of one page
//
// Returns: Vec<String> of raw href values, in document order
//
// Example:
//   markup = "<a href='/docs'>Docs</a><a href=''>Top</a>"
//   result = ["/docs", ""]
pub fn extract_links(markup: &str) -> Vec<String> {
    // The selector is a constant; if it ever failed to parse we would rather
    // discover nothing than abort the crawl
    let Ok(selector) = Selector::parse(ANCHOR_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(markup);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Html::parse_document even for fragments?
//    - Render functions may return a full document or a snippet
//    - html5ever wraps snippets in <html><body> automatically
//    - Either way the anchors end up in the tree
//
// 2. Why keep duplicates?
//    - The crawler deduplicates against its visited set
//    - Dropping them here would hide information from `pagecrawl links`
// -----------------------------------------------------------------------------
