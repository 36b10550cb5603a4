// src/pages/pipeline.rs
// =============================================================================
// Options, validation and the crawl -> filenames -> transform -> emit run.
//
// A build goes through four steps:
// 1. map_stats_to_props turns the host build's stats into render props
// 2. The crawler renders every reachable page from the seed paths
// 3. Each result gets a filename (map_result_to_filename + to_filename)
// 4. map_results may reorder/drop/add results, then each one is emitted
//
// Emission only starts once every page rendered successfully and the sink
// accepted every filename, so a failed build never leaves half a site in the
// sink.
// =============================================================================

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::info;

use crate::crawl::crawl_pages;
use crate::error::{PagesError, Result};
use crate::pages::filename::to_filename;
use crate::pages::result::{BuildStats, CrawlResult, OutputResult, RenderProps, RenderResult};
use crate::pages::sink::{Asset, AssetSink};

pub type RenderFuture = BoxFuture<'static, anyhow::Result<RenderResult>>;
pub type RenderFn<P> = Arc<dyn Fn(RenderProps<P>) -> RenderFuture + Send + Sync>;
pub type MapStatsToProps<P> = Arc<dyn Fn(&BuildStats) -> P + Send + Sync>;
pub type MapResults = Arc<dyn Fn(Vec<OutputResult>) -> Vec<OutputResult> + Send + Sync>;
pub type MapResultToFilename = Arc<dyn Fn(&CrawlResult) -> String + Send + Sync>;

/// Everything a build can be configured with.
///
/// `map_stats_to_props` and `render` are required; `Pages::new` rejects
/// options without them.
pub struct PagesOptions<P> {
    map_stats_to_props: Option<MapStatsToProps<P>>,
    render: Option<RenderFn<P>>,
    paths: Vec<String>,
    map_results: MapResults,
    map_result_to_filename: MapResultToFilename,
}

impl<P> Default for PagesOptions<P> {
    fn default() -> Self {
        Self {
            map_stats_to_props: None,
            render: None,
            paths: vec!["/".to_string()],
            map_results: Arc::new(|results: Vec<OutputResult>| results),
            map_result_to_filename: Arc::new(|result: &CrawlResult| result.path.clone()),
        }
    }
}

impl<P> PagesOptions<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_stats_to_props(mut self, f: impl Fn(&BuildStats) -> P + Send + Sync + 'static) -> Self {
        self.map_stats_to_props = Some(Arc::new(f));
        self
    }

    /// Sets the render function. Synchronous renderers can return
    /// `std::future::ready(...)`.
    pub fn render<F, Fut>(mut self, f: F) -> Self
    where
        P: 'static,
        F: Fn(RenderProps<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<RenderResult>> + Send + 'static,
    {
        self.render = Some(Arc::new(move |props| f(props).boxed()));
        self
    }

    /// Seed paths. Defaults to `["/"]`.
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn map_results(
        mut self,
        f: impl Fn(Vec<OutputResult>) -> Vec<OutputResult> + Send + Sync + 'static,
    ) -> Self {
        self.map_results = Arc::new(f);
        self
    }

    /// Picks the logical path a result's filename is derived from.
    /// Defaults to the path it was rendered for.
    pub fn map_result_to_filename(mut self, f: impl Fn(&CrawlResult) -> String + Send + Sync + 'static) -> Self {
        self.map_result_to_filename = Arc::new(f);
        self
    }
}

/// A validated build configuration.
pub struct Pages<P> {
    map_stats_to_props: MapStatsToProps<P>,
    render: RenderFn<P>,
    paths: Vec<String>,
    map_results: MapResults,
    map_result_to_filename: MapResultToFilename,
}

impl<P: Clone> Pages<P> {
    pub fn new(options: PagesOptions<P>) -> Result<Self> {
        let map_stats_to_props = options
            .map_stats_to_props
            .ok_or(PagesError::MissingOption("map_stats_to_props"))?;
        let render = options.render.ok_or(PagesError::MissingOption("render"))?;

        Ok(Self {
            map_stats_to_props,
            render,
            paths: options.paths,
            map_results: options.map_results,
            map_result_to_filename: options.map_result_to_filename,
        })
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Renders every page reachable from the seed paths.
    pub async fn crawl(&self, stats: &BuildStats) -> Result<Vec<CrawlResult>> {
        let props = (self.map_stats_to_props)(stats);
        let render = self.render.as_ref();
        crawl_pages(&self.paths, &props, |p| render(p)).await
    }

    /// Crawls, names and transforms the results without emitting them.
    pub async fn run(&self, stats: &BuildStats) -> Result<Vec<OutputResult>> {
        let crawled = self.crawl(stats).await?;

        let outputs = crawled
            .into_iter()
            .map(|result| {
                let filename = to_filename(&(self.map_result_to_filename)(&result))?;
                Ok(OutputResult::new(result, filename))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((self.map_results)(outputs))
    }

    /// Runs the whole build and emits every result into `sink`.
    ///
    /// Returns the emitted results in emission order.
    pub async fn emit<S: AssetSink>(&self, stats: &BuildStats, sink: &mut S) -> Result<Vec<OutputResult>> {
        let outputs = self.run(stats).await?;

        for output in &outputs {
            sink.check(&output.filename)?;
        }
        for output in &outputs {
            sink.emit(&output.filename, Asset::new(output.markup()))?;
        }

        info!(assets = outputs.len(), "emitted pages");
        Ok(outputs)
    }
}
