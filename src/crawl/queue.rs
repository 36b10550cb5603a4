// src/crawl/queue.rs
// =============================================================================
// This module renders a site breadth-first, following its own links.
//
// How it works:
// 1. Start with the seed paths as the first frontier
// 2. Render each frontier path (one at a time, in order)
// 3. Extract all links from the rendered markup
// 4. Resolve them and keep the ones pointing at pages of this site
// 5. The links found in this round become the next frontier
// 6. Stop when a round discovers nothing new
//
// Guarantees:
// - Renders never overlap: each one is awaited before the next starts
// - A page is rendered at most once, however many links point at it
// - The first failing render aborts the crawl; nothing is retried
// =============================================================================

use std::collections::HashSet;
use std::future::Future;

use tracing::{debug, info, warn};

use crate::crawl::path::{harvest, normalize_seed};
use crate::error::{PagesError, Result};
use crate::links::extract_links;
use crate::pages::{to_filename, CrawlResult, RenderProps, RenderResult};

/// Paths already rendered or scheduled during one crawl.
///
/// Paths are compared by the file they would be written to, so "/docs" and
/// "/docs/" count as the same page.
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as visited. Returns false if it already was.
    pub fn insert(&mut self, path: &str) -> Result<bool> {
        Ok(self.keys.insert(to_filename(path)?))
    }

    pub fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.keys.contains(&to_filename(path)?))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// Crawls a site starting from the seed paths
//
// Parameters:
//   seeds: where to start; normalized first, seeds above the root are dropped
//   props: caller props, cloned into every render call
//   render: the caller's render function
//
// Returns: one CrawlResult per rendered page, in discovery order
pub async fn crawl_pages<P, F, Fut>(seeds: &[String], props: &P, render: F) -> Result<Vec<CrawlResult>>
where
    P: Clone,
    F: Fn(RenderProps<P>) -> Fut,
    Fut: Future<Output = anyhow::Result<RenderResult>>,
{
    let mut frontier: Vec<String> = seeds
        .iter()
        .filter_map(|seed| {
            let normalized = normalize_seed(seed);
            if normalized.is_none() {
                warn!(seed = %seed, "skipping seed outside the site root");
            }
            normalized
        })
        .collect();

    let mut visited = VisitedSet::new();
    let mut results = Vec::new();
    let mut round = 0usize;

    while !frontier.is_empty() {
        round += 1;
        let mut next_frontier = Vec::new();

        for path in frontier {
            if !visited.insert(&path)? {
                continue;
            }

            debug!(round, path = %path, "rendering page");
            let rendered = render(RenderProps::new(path.clone(), props.clone()))
                .await
                .map_err(|e| PagesError::render(path.clone(), e))?;

            let before = next_frontier.len();
            for href in extract_links(&rendered.markup) {
                let Some(link) = harvest(&path, &href) else {
                    continue;
                };
                // Only add if not visited; the check above still catches
                // links found twice within this round
                if !visited.contains(&link)? {
                    next_frontier.push(link);
                }
            }
            debug!(path = %path, discovered = next_frontier.len() - before, "harvested links");

            results.push(CrawlResult {
                path,
                render: rendered,
            });
        }

        frontier = next_frontier;
    }

    info!(pages = results.len(), rounds = round, "crawl finished");
    Ok(results)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a Vec per round instead of one VecDeque?
//    - Both give breadth-first order
//    - Keeping rounds separate makes "nothing new this round" the obvious
//      stopping condition and lets the logs say which round a page came from
//
// 2. Why is the visited set local?
//    - Every call to crawl_pages starts from nothing
//    - Two crawls never share state, so running one twice over a pure render
//      function gives the same result list both times
//
// 3. Why no concurrency?
//    - Render functions may have side effects that depend on order
//    - A failure on page n must stop before page n+1 is rendered
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn page(markup: &str) -> anyhow::Result<RenderResult> {
        Ok(RenderResult::new(markup))
    }

    fn seeds(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn paths_of(results: &[CrawlResult]) -> Vec<&str> {
        results.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_visited_set_uses_filename_identity() {
        let mut visited = VisitedSet::new();
        assert!(visited.insert("/docs").unwrap());
        assert!(!visited.insert("/docs/").unwrap());
        assert!(visited.contains("/docs").unwrap());
        assert_eq!(visited.len(), 1);
    }

    #[tokio::test]
    async fn test_breadth_first_discovery_order() {
        let render = |props: RenderProps<()>| async move {
            match props.path.as_str() {
                "/" => page(r#"<a href="/a">a</a><a href="/b">b</a>"#),
                "/a" => page(r#"<a href="/a/deep">deep</a>"#),
                "/b" => page(r#"<a href="/">home</a>"#),
                _ => page("leaf"),
            }
        };

        let results = crawl_pages(&seeds(&["/"]), &(), render).await.unwrap();
        assert_eq!(paths_of(&results), vec!["/", "/a", "/b", "/a/deep"]);
    }

    #[tokio::test]
    async fn test_each_page_rendered_once() {
        let calls = RefCell::new(Vec::new());
        let render = |props: RenderProps<()>| {
            calls.borrow_mut().push(props.path.clone());
            async move { page(r#"<a href="/">home</a><a href="/x">x</a><a href="x">x again</a>"#) }
        };

        let results = crawl_pages(&seeds(&["/", "/"]), &(), render).await.unwrap();
        assert_eq!(paths_of(&results), vec!["/", "/x"]);
        assert_eq!(*calls.borrow(), vec!["/", "/x"]);
    }

    #[tokio::test]
    async fn test_props_reach_every_render() {
        let render = |props: RenderProps<&'static str>| async move {
            page(&format!("{} at {}", props.props, props.path))
        };

        let results = crawl_pages(&seeds(&["/"]), &"hello", render).await.unwrap();
        assert_eq!(results[0].render.markup, "hello at /");
    }

    #[tokio::test]
    async fn test_relative_links_resolve_against_page() {
        let render = |props: RenderProps<()>| async move {
            match props.path.as_str() {
                "/docs/" => page(r#"<a href="intro">intro</a>"#),
                "/docs/intro" => page(r#"<a href="../about.html">about</a>"#),
                _ => page(""),
            }
        };

        let results = crawl_pages(&seeds(&["/docs/"]), &(), render).await.unwrap();
        assert_eq!(paths_of(&results), vec!["/docs/", "/docs/intro", "/about.html"]);
    }

    #[tokio::test]
    async fn test_render_failure_stops_the_crawl() {
        let calls = RefCell::new(Vec::new());
        let render = |props: RenderProps<()>| {
            calls.borrow_mut().push(props.path.clone());
            async move {
                match props.path.as_str() {
                    "/" => page(r#"<a href="/bad">bad</a><a href="/after">after</a>"#),
                    "/bad" => Err(anyhow::anyhow!("template exploded")),
                    _ => page(""),
                }
            }
        };

        let err = crawl_pages(&seeds(&["/"]), &(), render).await.unwrap_err();
        assert!(matches!(err, PagesError::Render { ref path, .. } if path == "/bad"));
        assert_eq!(*calls.borrow(), vec!["/", "/bad"]);
    }

    #[tokio::test]
    async fn test_shared_parent_link_above_root_terminates() {
        let calls = RefCell::new(0usize);
        let render = |props: RenderProps<()>| {
            *calls.borrow_mut() += 1;
            let runaway = *calls.borrow() > 10;
            async move {
                if runaway {
                    return Err(anyhow::anyhow!("still crawling at {}", props.path));
                }
                page(r#"<a href="../..">up</a>"#)
            }
        };

        let results = crawl_pages(&seeds(&["/a/b"]), &(), render).await.unwrap();
        assert_eq!(paths_of(&results), vec!["/a/b", "/..", "/../.."]);
    }

    #[tokio::test]
    async fn test_relative_links_from_escaped_page() {
        let render = |props: RenderProps<()>| async move {
            match props.path.as_str() {
                "/" => page(r#"<a href="../x/">x</a>"#),
                "/../x/" => page(r#"<a href="../y">y</a><a href="..">up</a>"#),
                _ => page(""),
            }
        };

        let results = crawl_pages(&seeds(&["/"]), &(), render).await.unwrap();
        assert_eq!(paths_of(&results), vec!["/", "/../x/", "/../y", "/.."]);
    }

    #[tokio::test]
    async fn test_seed_above_root_is_skipped() {
        let render = |_props: RenderProps<()>| async move { page("") };

        let results = crawl_pages(&seeds(&["/../etc", "/ok"]), &(), render)
            .await
            .unwrap();
        assert_eq!(paths_of(&results), vec!["/ok"]);
    }

    #[tokio::test]
    async fn test_no_seeds_renders_nothing() {
        let render = |_props: RenderProps<()>| async move { page("") };
        let results = crawl_pages(&[], &(), render).await.unwrap();
        assert!(results.is_empty());
    }
}
