// src/pages/filename.rs
// =============================================================================
// Maps a logical path to the file it is written to.
//
// One rule decides everything:
// - The last segment has an extension  -> write the path as-is
// - Otherwise it is a directory page   -> write <path>/index.html
//
// Want "/about" written as "about.html"? Link to "/about.html" instead.
// =============================================================================

use crate::error::{PagesError, Result};

const INDEX_DOCUMENT: &str = "index.html";

// Examples:
//   "/"          -> "index.html"
//   "/products"  -> "products/index.html"
//   "/products/" -> "products/index.html"
//   "/foo.html"  -> "foo.html"
pub fn to_filename(path: &str) -> Result<String> {
    if !path.starts_with('/') {
        return Err(PagesError::InvalidPath(path.to_string()));
    }

    let trimmed = collapse_slashes(path.trim_matches('/'));
    if trimmed.is_empty() {
        return Ok(INDEX_DOCUMENT.to_string());
    }

    let last = trimmed.rsplit('/').next().unwrap_or_default();
    if has_extension(last) && !path.ends_with('/') {
        Ok(trimmed)
    } else {
        Ok(format!("{trimmed}/{INDEX_DOCUMENT}"))
    }
}

fn has_extension(segment: &str) -> bool {
    segment.contains('.')
}

fn collapse_slashes(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_index() {
        assert_eq!(to_filename("/").unwrap(), "index.html");
    }

    #[test]
    fn test_directory_page_gets_index() {
        assert_eq!(to_filename("/products").unwrap(), "products/index.html");
        assert_eq!(to_filename("/products/").unwrap(), "products/index.html");
        assert_eq!(to_filename("/a//b").unwrap(), "a/b/index.html");
    }

    #[test]
    fn test_file_page_is_kept() {
        assert_eq!(to_filename("/foo.html").unwrap(), "foo.html");
        assert_eq!(to_filename("/feeds/rss.xml").unwrap(), "feeds/rss.xml");
    }

    #[test]
    fn test_dotted_directory_only_counts_last_segment() {
        assert_eq!(to_filename("/v1.2/docs").unwrap(), "v1.2/docs/index.html");
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let err = to_filename("products").unwrap_err();
        assert!(matches!(err, PagesError::InvalidPath(p) if p == "products"));
    }
}
