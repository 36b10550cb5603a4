// src/logging.rs
// =============================================================================
// Installs the tracing subscriber for the CLI.
//
// RUST_LOG wins when set. Otherwise pagecrawl logs at info, or debug with
// --verbose. Logs go to stderr so `--json` output on stdout stays clean.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "pagecrawl=debug" } else { "pagecrawl=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
