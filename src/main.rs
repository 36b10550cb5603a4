// src/main.rs
// =============================================================================
// This is the entry point of the pagecrawl CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = build failed, 2 = error)
//
// The crawl engine itself lives in the library (src/lib.rs); this file only
// wires the directory renderer and the directory sink into it.
// =============================================================================

mod cli;
mod config;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use cli::{Cli, Commands};
use config::{load_file_config, BuildConfig, BuildFlags};
use pagecrawl::crawl::harvest;
use pagecrawl::links::extract_links;
use pagecrawl::site::{SiteProps, SiteRenderer};
use pagecrawl::{BuildStats, DirectorySink, OutputResult, Pages, PagesOptions};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            config,
            source,
            out,
            paths,
            stats,
            json,
        } => {
            let file = load_file_config(config.as_deref())?;
            let flags = BuildFlags {
                source,
                out,
                paths,
                stats,
            };
            handle_build(BuildConfig::resolve(file, flags), json).await
        }
        Commands::Links { file, page } => handle_links(&file, &page).await,
    }
}

// Handles the 'build' subcommand
async fn handle_build(config: BuildConfig, json: bool) -> Result<i32> {
    if !json {
        println!("🔍 Rendering site from: {}", config.source.display());
        println!("🌱 Seed paths: {}", config.paths.join(", "));
    }

    let stats = match &config.stats {
        Some(path) => BuildStats::load(path)
            .await
            .with_context(|| format!("failed to load build stats {}", path.display()))?,
        None => BuildStats::default(),
    };

    let renderer = Arc::new(SiteRenderer::open(&config.source).await?);

    let options = PagesOptions::new()
        .map_stats_to_props(SiteProps::from_stats)
        .render(move |props| {
            let renderer = Arc::clone(&renderer);
            async move { renderer.render(props).await }
        })
        .paths(config.paths.clone());
    let pages = Pages::new(options)?;

    let mut sink = DirectorySink::new(&config.out);
    let emitted = match pages.emit(&stats, &mut sink).await {
        Ok(emitted) => emitted,
        Err(e) if e.is_build_failure() => {
            error!("{e}");
            eprintln!("❌ Build failed: {e}");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&emitted)?);
    } else {
        print_table(&emitted);
        println!("✅ Wrote {} page(s) to {}", emitted.len(), config.out.display());
    }

    Ok(0)
}

// Handles the 'links' subcommand
async fn handle_links(file: &std::path::Path, page: &str) -> Result<i32> {
    let markup = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let hrefs = extract_links(&markup);
    println!("🔗 {} link(s) in {} rendered at {}", hrefs.len(), file.display(), page);
    println!("{:<50} {:<40}", "HREF", "RESOLVED");
    println!("{}", "=".repeat(90));

    for href in &hrefs {
        let resolved = harvest(page, href).unwrap_or_else(|| "(skipped)".to_string());
        println!("{:<50} {:<40}", display_href(href), resolved);
    }

    Ok(0)
}

fn display_href(href: &str) -> String {
    if href.is_empty() {
        "(empty)".to_string()
    } else if href.chars().count() > 47 {
        format!("{}...", href.chars().take(47).collect::<String>())
    } else {
        href.to_string()
    }
}

// Prints emitted pages as a human-readable table
fn print_table(results: &[OutputResult]) {
    println!("{:<45} {:>10}  {:<30}", "FILE", "BYTES", "PATH");
    println!("{}", "=".repeat(90));

    for result in results {
        println!(
            "{:<45} {:>10}  {:<30}",
            result.filename,
            result.markup().len(),
            result.path
        );
    }

    println!();
}
