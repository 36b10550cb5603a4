// src/pages/sink.rs
// =============================================================================
// Where finished pages go.
//
// A sink receives (filename, asset) pairs in emission order. Emitting the
// same filename twice replaces the earlier asset: last write wins.
//
// Two sinks ship with the crate:
// - BTreeMap<String, Asset>: in memory, handy for embedding and tests
// - DirectorySink: writes each asset below an output directory
// =============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{PagesError, Result};

/// Content of one emitted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    content: String,
}

impl Asset {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.content
    }

    /// Length of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Receives the assets produced by a build.
pub trait AssetSink {
    /// Rejects a filename the sink could never write. Called for every
    /// asset before the first `emit`, so a bad name leaves the sink untouched.
    fn check(&self, _filename: &str) -> Result<()> {
        Ok(())
    }

    fn emit(&mut self, filename: &str, asset: Asset) -> Result<()>;
}

impl AssetSink for BTreeMap<String, Asset> {
    fn emit(&mut self, filename: &str, asset: Asset) -> Result<()> {
        if self.insert(filename.to_string(), asset).is_some() {
            warn!(filename, "asset emitted twice, keeping the later one");
        }
        Ok(())
    }
}

/// Writes assets as files below `root`, creating directories as needed.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    written: BTreeMap<String, usize>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filenames written so far with their size in bytes.
    pub fn written(&self) -> &BTreeMap<String, usize> {
        &self.written
    }

    fn target(&self, filename: &str) -> Result<PathBuf> {
        let relative = Path::new(filename);
        let stays_inside = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if filename.is_empty() || !stays_inside {
            return Err(PagesError::UnsafeFilename(filename.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetSink for DirectorySink {
    fn check(&self, filename: &str) -> Result<()> {
        self.target(filename).map(|_| ())
    }

    fn emit(&mut self, filename: &str, asset: Asset) -> Result<()> {
        let target = self.target(filename)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, asset.source())?;

        debug!(filename, bytes = asset.size(), "wrote asset");
        if self.written.insert(filename.to_string(), asset.size()).is_some() {
            warn!(filename, "asset emitted twice, keeping the later one");
        }
        Ok(())
    }
}
