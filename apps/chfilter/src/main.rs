//! # chfilter - Core-Aware Edge Filter Inspector
//!
//! The main binary for inspecting core-aware contraction hierarchy filters.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize the graph and its core
//! chfilter -g graph.toml inspect
//!
//! # Evaluate one edge in the in-core phase
//! chfilter -g graph.toml check -b 2 -a 3 --in-core
//!
//! # Evaluate every edge, listing each decision
//! chfilter -g graph.toml sweep --verbose
//! ```

use chfilter::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing: CHFILTER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CHFILTER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chfilter=info,chfilter_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
