// src/links/mod.rs
// =============================================================================
// Link discovery over rendered markup.
//
// Submodules:
// - html: Pulls raw href values out of anchor elements
//
// The extractor reports hrefs exactly as written. Deciding which ones point
// at pages of this site, and what path they resolve to, is done by
// crate::crawl::path.
// =============================================================================

mod html;

pub use html::extract_links;
