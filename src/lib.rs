// src/lib.rs
// =============================================================================
// pagecrawl renders a whole site from a render function you supply.
//
// You hand it:
// - a render function: logical path (+ your props) -> HTML
// - one or more seed paths, "/" by default
//
// It renders the seeds, follows every same-site link in their markup,
// renders those pages, and so on until no new page turns up. Each page is
// written once, to a filename derived from its path.
//
// Modules:
// - links: raw href extraction from HTML
// - crawl: href resolution and the breadth-first render loop
// - pages: options, filenames, the build pipeline and asset sinks
// - site: a render function over a directory of .md/.html sources
// =============================================================================

pub mod crawl;
pub mod error;
pub mod links;
pub mod pages;
pub mod site;

pub use error::{PagesError, Result};
pub use pages::{
    to_filename, Asset, AssetSink, BuildStats, CrawlResult, DirectorySink, OutputResult, Pages,
    PagesOptions, RenderProps, RenderResult,
};
