// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a site through its render function.
//
// Submodules:
// - path: Scope checks and resolution of hrefs into logical paths
// - queue: The breadth-first render/harvest loop
//
// Features:
// - Breadth-first crawling starting from one or more seed paths
// - Only follows links that stay on this site
// - Renders every reachable page exactly once, sequentially
// =============================================================================

pub mod path;
mod queue;

pub use path::{harvest, is_in_scope, normalize_seed, resolve};
pub use queue::{crawl_pages, VisitedSet};
