// src/error.rs
// =============================================================================
// Error types for the pagecrawl library.
//
// What can go wrong inside a build:
// - The options are incomplete (no render function, no stats mapper)
// - A logical path reaching the filename stage is not absolute
// - The caller's render function fails
// - The sink refuses a filename (e.g. ".." from a page above the root)
//
// None of them is retried. Any of them aborts the whole build before a single
// asset is emitted.
// =============================================================================

use thiserror::Error;

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, PagesError>;

/// Everything that can abort a crawl or a build.
#[derive(Error, Debug)]
pub enum PagesError {
    /// A required option was not supplied to `Pages::new`
    #[error("pages options must contain `{0}` function")]
    MissingOption(&'static str),

    /// A logical path that does not start with `/`
    #[error("encountered invalid path: {0}")]
    InvalidPath(String),

    /// The render function failed for one page
    #[error("render failed for {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// An asset filename that would land outside the output directory
    #[error("refusing to write asset outside the output directory: {0}")]
    UnsafeFilename(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PagesError {
    /// Wraps a render function failure with the path being rendered.
    pub fn render(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Render {
            path: path.into(),
            source: source.into(),
        }
    }

    /// True for errors that mean the build itself failed, as opposed to
    /// problems reading inputs or writing outputs. A page the sink refuses
    /// to write counts as a failed build: the crawl produced it.
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            Self::Render { .. } | Self::InvalidPath(_) | Self::UnsafeFilename(_)
        )
    }
}
