// src/site/mod.rs
// =============================================================================
// A ready-made render function: pages come from a directory of .md and .html
// source files.
//
// Submodules:
// - markdown: Markdown -> HTML
// - render: Source lookup, layout wrapping and the render entry point
//
// The library's crawl engine does not depend on this module; it exists so
// the `pagecrawl` binary can build a site without any Rust code.
// =============================================================================

mod markdown;
mod render;

pub use markdown::to_html;
pub use render::{SiteProps, SiteRenderer, LAYOUT_FILE};
