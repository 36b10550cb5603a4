// src/site/markdown.rs
// =============================================================================
// Renders Markdown page sources to HTML.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into a stream of events (heading, paragraph, link, ...)
// - Follows the CommonMark specification
// - Ships an HTML writer for those events
//
// Links written as [text](target) come out as <a href="target">, so the
// crawler follows them like any hand-written anchor.
// =============================================================================

use pulldown_cmark::{html, Options, Parser};

pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::extract_links;

    #[test]
    fn test_heading_and_paragraph() {
        let html = to_html("# Products\n\nWe have the hugest products.");
        assert!(html.contains("<h1>Products</h1>"));
        assert!(html.contains("<p>We have the hugest products.</p>"));
    }

    #[test]
    fn test_markdown_links_become_anchors() {
        let markdown = r#"
- [Products](/products)
- [Learn more](sobig.html)
- [Rust](https://www.rust-lang.org)
        "#;
        let links = extract_links(&to_html(markdown));
        assert_eq!(
            links,
            vec!["/products", "sobig.html", "https://www.rust-lang.org"]
        );
    }

    #[test]
    fn test_tables_enabled() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
