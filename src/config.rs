// src/config.rs
// =============================================================================
// Build configuration for the CLI.
//
// Three layers, highest priority first:
// 1. Command-line flags
// 2. pagecrawl.toml (explicit --config, or ./pagecrawl.toml if it exists)
// 3. Defaults: source = "site", out = "dist", paths = ["/"], no stats
//
// Relative paths inside the config file are taken relative to the file's
// own directory, so `pagecrawl build --config sub/pagecrawl.toml` works from
// anywhere.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "pagecrawl.toml";

/// Contents of pagecrawl.toml. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub paths: Option<Vec<String>>,
    pub stats: Option<PathBuf>,
}

/// The flags of `pagecrawl build` that can override the file.
#[derive(Debug, Clone, Default)]
pub struct BuildFlags {
    pub source: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub paths: Vec<String>,
    pub stats: Option<PathBuf>,
}

/// Fully resolved settings for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub source: PathBuf,
    pub out: PathBuf,
    pub paths: Vec<String>,
    pub stats: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid pagecrawl config")
    }

    // Rebases relative paths onto the directory the config file lives in
    fn relative_to(mut self, dir: &Path) -> Self {
        let rebase = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        self.source = self.source.map(rebase);
        self.out = self.out.map(rebase);
        self.stats = self.stats.map(rebase);
        self
    }
}

// Loads the config file
//
// An explicit path must exist. Without one, ./pagecrawl.toml is used when it
// is there and silently skipped when it is not.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(FileConfig::default());
            }
            default
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = FileConfig::from_toml(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.relative_to(dir))
}

impl BuildConfig {
    pub fn resolve(file: FileConfig, flags: BuildFlags) -> Self {
        let paths = if !flags.paths.is_empty() {
            flags.paths
        } else {
            file.paths.unwrap_or_else(|| vec!["/".to_string()])
        };

        Self {
            source: flags.source.or(file.source).unwrap_or_else(|| PathBuf::from("site")),
            out: flags.out.or(file.out).unwrap_or_else(|| PathBuf::from("dist")),
            paths,
            stats: flags.stats.or(file.stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = BuildConfig::resolve(FileConfig::default(), BuildFlags::default());
        assert_eq!(
            config,
            BuildConfig {
                source: PathBuf::from("site"),
                out: PathBuf::from("dist"),
                paths: vec!["/".to_string()],
                stats: None,
            }
        );
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig::from_toml(
            r#"
            source = "pages"
            out = "public"
            paths = ["/", "/404.html"]
            "#,
        )
        .unwrap();
        let flags = BuildFlags {
            out: Some(PathBuf::from("tmp-out")),
            ..BuildFlags::default()
        };

        let config = BuildConfig::resolve(file, flags);
        assert_eq!(config.source, PathBuf::from("pages"));
        assert_eq!(config.out, PathBuf::from("tmp-out"));
        assert_eq!(config.paths, vec!["/", "/404.html"]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("sauce = \"site\"").is_err());
    }

    #[test]
    fn test_file_paths_are_relative_to_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "source = \"pages\"\nstats = \"/abs/stats.json\"\n").unwrap();

        let config = load_file_config(Some(&path)).unwrap();
        assert_eq!(config.source, Some(tmp.path().join("pages")));
        assert_eq!(config.stats, Some(PathBuf::from("/abs/stats.json")));
        assert_eq!(config.out, None);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_file_config(Some(&tmp.path().join("nope.toml"))).is_err());
    }
}
