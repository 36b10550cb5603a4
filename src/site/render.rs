// src/site/render.rs
// =============================================================================
// A render function backed by a directory of page sources.
//
// Lookup for a logical path:
//   "/"              -> index.md, index.html
//   "/products"      -> products.md, products.html,
//                       products/index.md, products/index.html
//   "/sobig.html"    -> sobig.html  (paths with an extension map 1:1)
//
// The first candidate that exists wins. Markdown is converted to HTML, and
// both Markdown and HTML fragments are wrapped in `_layout.html` when the
// source directory has one. Files that are already full documents, or have
// any other extension, are passed through untouched.
//
// A path with no source is an error: a link to a page that does not exist
// fails the build instead of silently producing nothing.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::pages::{BuildStats, RenderProps, RenderResult};
use crate::site::markdown::to_html;

pub const LAYOUT_FILE: &str = "_layout.html";

/// Props the directory renderer derives from the host build's stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteProps {
    pub public_path: String,
    pub hash: String,
    pub scripts: Vec<String>,
    pub styles: Vec<String>,
}

impl SiteProps {
    pub fn from_stats(stats: &BuildStats) -> Self {
        let urls_ending_with = |suffix: &str| {
            stats
                .assets
                .iter()
                .filter(|asset| asset.name.ends_with(suffix))
                .map(|asset| format!("{}{}", stats.public_path, asset.name))
                .collect::<Vec<_>>()
        };

        Self {
            public_path: stats.public_path.clone(),
            hash: stats.hash.clone(),
            scripts: urls_ending_with(".js"),
            styles: urls_ending_with(".css"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteRenderer {
    root: PathBuf,
    layout: Option<String>,
}

impl SiteRenderer {
    /// Opens a source directory and loads its layout, if any.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        let metadata = tokio::fs::metadata(&root)
            .await
            .with_context(|| format!("page source directory {} not found", root.display()))?;
        if !metadata.is_dir() {
            bail!("page source {} is not a directory", root.display());
        }

        let layout = match tokio::fs::read_to_string(root.join(LAYOUT_FILE)).await {
            Ok(layout) => Some(layout),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e).context("failed to read layout"),
        };

        Ok(Self { root, layout })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Source files that could render `path`, most specific first.
    ///
    /// Returns None when the path climbs out of the source directory.
    pub fn candidates(&self, path: &str) -> Option<Vec<PathBuf>> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| *s == ".." || *s == ".") {
            return None;
        }

        let relative = segments.join("/");
        let candidates = match segments.last() {
            None => vec!["index.md".to_string(), "index.html".to_string()],
            Some(last) if last.contains('.') && !path.ends_with('/') => vec![relative],
            Some(_) => vec![
                format!("{relative}.md"),
                format!("{relative}.html"),
                format!("{relative}/index.md"),
                format!("{relative}/index.html"),
            ],
        };

        Some(candidates.into_iter().map(|c| self.root.join(c)).collect())
    }

    pub async fn render(&self, props: RenderProps<SiteProps>) -> Result<RenderResult> {
        let candidates = self
            .candidates(&props.path)
            .ok_or_else(|| anyhow!("page path {} leaves the source directory", props.path))?;

        for file in candidates {
            let source = match tokio::fs::read_to_string(&file).await {
                Ok(source) => source,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e).with_context(|| format!("failed to read {}", file.display())),
            };

            debug!(path = %props.path, source = %file.display(), "rendering page source");

            let markup = match file.extension().and_then(|ext| ext.to_str()) {
                Some("md") => self.wrap(&to_html(&source), &props),
                Some("html" | "htm") if !is_full_document(&source) => self.wrap(&source, &props),
                _ => source,
            };

            let relative = file.strip_prefix(&self.root).unwrap_or(file.as_path());
            return Ok(RenderResult::new(markup).with_field("source", relative.display().to_string()));
        }

        bail!("no page source for {} in {}", props.path, self.root.display())
    }

    fn wrap(&self, content: &str, props: &RenderProps<SiteProps>) -> String {
        match &self.layout {
            Some(layout) => fill_layout(layout, content, props),
            None => content.to_string(),
        }
    }
}

fn is_full_document(source: &str) -> bool {
    let head = source.trim_start().to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

// `{{content}}` is substituted last so placeholders written inside a page
// body stay literal
fn fill_layout(layout: &str, content: &str, props: &RenderProps<SiteProps>) -> String {
    let site = &props.props;

    let scripts = site
        .scripts
        .iter()
        .map(|src| format!(r#"<script src="{src}"></script>"#))
        .collect::<Vec<_>>()
        .join("\n");
    let styles = site
        .styles
        .iter()
        .map(|href| format!(r#"<link rel="stylesheet" href="{href}">"#))
        .collect::<Vec<_>>()
        .join("\n");

    layout
        .replace("{{path}}", &props.path)
        .replace("{{public_path}}", &site.public_path)
        .replace("{{hash}}", &site.hash)
        .replace("{{scripts}}", &scripts)
        .replace("{{styles}}", &styles)
        .replace("{{content}}", content)
}
