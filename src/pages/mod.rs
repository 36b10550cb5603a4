// src/pages/mod.rs
// =============================================================================
// This module turns crawl results into emitted files.
//
// Submodules:
// - result: The data passed between stages (props, render results, stats)
// - filename: Logical path -> output filename
// - pipeline: Options, validation and the full build run
// - sink: Where emitted assets end up
// =============================================================================

mod filename;
mod pipeline;
mod result;
mod sink;

pub use filename::to_filename;
pub use pipeline::{
    MapResultToFilename, MapResults, MapStatsToProps, Pages, PagesOptions, RenderFn, RenderFuture,
};
pub use result::{BuildStats, CrawlResult, OutputResult, RenderProps, RenderResult, StatsAsset};
pub use sink::{Asset, AssetSink, DirectorySink};
