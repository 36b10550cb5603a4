// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Values left out here fall back to pagecrawl.toml, then to the defaults in
// src/config.rs.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pagecrawl",
    version,
    about = "Render a whole site by following the links of its own pages",
    long_about = "pagecrawl renders pages from a source directory of Markdown and HTML files, \
                  starting at one or more seed paths and following every same-site link, \
                  and writes each page to the output directory."
)]
pub struct Cli {
    /// Log every page rendered and every link harvested
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl and render the site, writing every page to the output directory
    ///
    /// Example: pagecrawl build --source site --out dist --path / --path /404.html
    Build {
        /// Config file (default: ./pagecrawl.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the page sources
        #[arg(long)]
        source: Option<PathBuf>,

        /// Directory the rendered pages are written to
        #[arg(long)]
        out: Option<PathBuf>,

        /// Seed path to start crawling from (repeatable)
        #[arg(long = "path", value_name = "PATH")]
        paths: Vec<String>,

        /// Build stats JSON (hash, publicPath, assets) passed to every page
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Print the emitted pages as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which links of one HTML file the crawler would follow
    ///
    /// Example: pagecrawl links dist/products/index.html --page /products
    Links {
        /// HTML file to inspect
        file: PathBuf,

        /// Logical path the file is rendered at, used for relative links
        #[arg(long, default_value = "/")]
        page: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_repeated_paths() {
        let cli = Cli::parse_from([
            "pagecrawl", "build", "--path", "/", "--path", "/404.html", "--json",
        ]);
        match cli.command {
            Commands::Build { paths, json, source, .. } => {
                assert_eq!(paths, vec!["/", "/404.html"]);
                assert!(json);
                assert!(source.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_links_defaults_to_root_page() {
        let cli = Cli::parse_from(["pagecrawl", "links", "page.html", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Links { file, page } => {
                assert_eq!(file, PathBuf::from("page.html"));
                assert_eq!(page, "/");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
