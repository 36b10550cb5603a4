// src/crawl/path.rs
// =============================================================================
// Turns raw href strings into logical paths of this site.
//
// A logical path is a site-relative location that always starts with `/`,
// e.g. "/", "/products", "/docs/intro.html". Nothing here touches the network
// or the filesystem: every function is pure string work.
//
// Resolution follows what a browser does for a page served at the current
// path: relative hrefs are taken against the page's directory (everything up
// to its last `/`). Walking `..` above the root does not fail, it keeps a
// literal `..` segment instead, so "/a/b" + "../.." gives "/..".
// =============================================================================

use url::{ParseError, Url};

// Cuts "?query" and "#fragment" off an href; neither is part of a logical path
pub fn strip_query_and_fragment(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

// Decides whether an href can point at another page of this site
//
// Rejected:
//   ""                    (empty, or only a fragment/query like "#top")
//   "//cdn.example.com/x" (protocol-relative, another host)
//   "https://example.com" (anything with a scheme: http, mailto, javascript...)
//   "http://exa mple.com" (a broken absolute URL is still not a site path)
pub fn is_in_scope(href: &str) -> bool {
    let href = strip_query_and_fragment(href.trim());

    if href.is_empty() || href.starts_with("//") {
        return false;
    }

    // Only a site path like "/docs" or "../x" fails with
    // RelativeUrlWithoutBase; any other error means a scheme was found
    matches!(Url::parse(href), Err(ParseError::RelativeUrlWithoutBase))
}

// Resolves an href against the logical path of the page that contained it
//
// Examples:
//   resolve("/a/b", "/x")           -> "/x"     (absolute, unchanged)
//   resolve("/a/b", "c")            -> "/a/c"
//   resolve("/a/b", "..")           -> "/"
//   resolve("/a/b", "../..")        -> "/.."    (escaped the root)
//   resolve("/../..", "../..")      -> "/.."    (escaped segments pop too)
//   resolve("/foo.html", "bar")     -> "/bar"
//   resolve("/docs/", "./intro")    -> "/docs/intro"
pub fn resolve(current: &str, href: &str) -> String {
    if href.starts_with('/') {
        return href.to_string();
    }

    let mut stack: Vec<&str> = current.split('/').filter(|s| !s.is_empty()).collect();

    // The last segment names the page itself unless the path ends in `/`
    if !current.ends_with('/') {
        stack.pop();
    }

    // `..` segments climbing above the root, kept as literal segments
    let mut escaped = 0usize;

    // A `..` anywhere in the href pops a segment, not only leading ones, so
    // "c/../d" collapses to "d" (see DESIGN.md, open question 2)
    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    escaped += 1;
                }
            }
            name => stack.push(name),
        }
    }

    let segments: Vec<&str> = std::iter::repeat("..").take(escaped).chain(stack).collect();
    let mut resolved = format!("/{}", segments.join("/"));
    if href.ends_with('/') && !segments.is_empty() {
        resolved.push('/');
    }
    resolved
}

// Resolves one href found on `current`, or returns None when it is not a
// link to a page of this site
pub fn harvest(current: &str, href: &str) -> Option<String> {
    if !is_in_scope(href) {
        return None;
    }

    let resolved = resolve(current, strip_query_and_fragment(href.trim()));
    resolved.starts_with('/').then_some(resolved)
}

// Anchors a seed path at the crawl root and collapses `.` and `..`
//
// Returns None for a seed that climbs above the root, so a crawl can never
// start outside of its own site.
//
// Examples:
//   "/foo/baz/qux/../.." -> Some("/foo")
//   "about"              -> Some("/about")
//   "/../secret"         -> None
pub fn normalize_seed(seed: &str) -> Option<String> {
    let seed = strip_query_and_fragment(seed.trim());
    let mut stack: Vec<&str> = Vec::new();

    for segment in seed.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop()?;
            }
            name => stack.push(name),
        }
    }

    let mut normalized = format!("/{}", stack.join("/"));
    if seed.ends_with('/') && !stack.is_empty() {
        normalized.push('/');
    }
    Some(normalized)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why split + a Vec<&str> stack instead of Url::join?
//    - Url::join clamps ".." at the root ("/a/b" + "../.." = "/")
//    - Generated sites rely on the literal "/.." result staying visible, so
//      the stack keeps it instead of silently swallowing it
//
// 2. Why do seeds behave differently?
//    - Seeds come from configuration, not from page markup
//    - A seed above the root is a mistake in the configuration, so it is
//      dropped (and logged by the crawler) rather than rendered
// -----------------------------------------------------------------------------
