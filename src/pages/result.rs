// src/pages/result.rs
// =============================================================================
// The values that flow through a build.
//
//   BuildStats --map_stats_to_props--> P
//   P + path   --> RenderProps<P> --render--> RenderResult
//   RenderResult + path            --> CrawlResult   (crawler output)
//   CrawlResult + filename         --> OutputResult  (pipeline output)
//
// Everything is plain owned data with serde derives, so the CLI can print any
// stage as JSON.
// =============================================================================

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Input of one render call: the caller's props plus the path being rendered.
///
/// Serializes as a single flat object, the props' own fields next to `path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderProps<P> {
    pub path: String,
    #[serde(flatten)]
    pub props: P,
}

impl<P> RenderProps<P> {
    pub fn new(path: impl Into<String>, props: P) -> Self {
        Self {
            path: path.into(),
            props,
        }
    }
}

/// What a render function hands back for one page.
///
/// Only `markup` is read by the crawler. `redirect`, `status` and any extra
/// fields are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    pub markup: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RenderResult {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A render result tagged with the logical path it was rendered for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlResult {
    pub path: String,
    #[serde(flatten)]
    pub render: RenderResult,
}

/// A crawl result with its output filename decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputResult {
    pub path: String,
    pub filename: String,
    #[serde(flatten)]
    pub render: RenderResult,
}

impl OutputResult {
    pub fn new(result: CrawlResult, filename: impl Into<String>) -> Self {
        Self {
            path: result.path,
            filename: filename.into(),
            render: result.render,
        }
    }

    pub fn markup(&self) -> &str {
        &self.render.markup
    }
}

/// Stats of the host build that invoked the crawl.
///
/// Shaped like a webpack stats JSON so an existing bundler's output can be
/// fed in directly; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildStats {
    pub hash: String,
    pub public_path: String,
    pub assets: Vec<StatsAsset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsAsset {
    pub name: String,
    pub chunk_names: Vec<String>,
}

impl BuildStats {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_props_flatten_next_to_path() {
        #[derive(Serialize)]
        struct Props {
            title: &'static str,
        }

        let props = RenderProps::new("/about", Props { title: "About" });
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json, serde_json::json!({"path": "/about", "title": "About"}));
    }

    #[test]
    fn test_render_result_keeps_extra_fields() {
        let json = r#"{"markup": "<p>hi</p>", "redirect": "/", "status": 200, "foo": "bar"}"#;
        let result: RenderResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.markup, "<p>hi</p>");
        assert_eq!(result.redirect.as_deref(), Some("/"));
        assert_eq!(result.status, Some(200));
        assert_eq!(result.extra.get("foo"), Some(&Value::from("bar")));
    }

    #[test]
    fn test_output_result_serializes_flat() {
        let crawled = CrawlResult {
            path: "/".to_string(),
            render: RenderResult::new("x").with_field("foo", "bar"),
        };
        let output = OutputResult::new(crawled, "index.html");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "/",
                "filename": "index.html",
                "markup": "x",
                "foo": "bar"
            })
        );
    }

    #[test]
    fn test_build_stats_from_webpack_json() {
        let json = r#"{
            "hash": "abc123",
            "publicPath": "/static/",
            "assets": [{"name": "main.js", "chunkNames": ["main"], "size": 10}],
            "version": "1.0"
        }"#;
        let stats = BuildStats::from_json(json).unwrap();
        assert_eq!(stats.hash, "abc123");
        assert_eq!(stats.public_path, "/static/");
        assert_eq!(stats.assets[0].chunk_names, vec!["main"]);
    }

    #[test]
    fn test_build_stats_defaults_when_empty() {
        assert_eq!(BuildStats::from_json("{}").unwrap(), BuildStats::default());
    }
}
