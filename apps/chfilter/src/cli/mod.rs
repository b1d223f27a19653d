//! # chfilter CLI Module
//!
//! This module implements the CLI interface for chfilter.
//!
//! ## Available Commands
//!
//! - `inspect` - Show node count, core level and core nodes
//! - `check` - Evaluate a single edge
//! - `sweep` - Evaluate every edge of the graph
//! - `chain` - Show the name of the fixture's filter chain

mod commands;

use chfilter_core::FilterError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// chfilter - core-aware contraction hierarchy edge filter
///
/// Loads a contracted graph fixture and reports which edges a two-phase
/// search would be allowed to relax.
#[derive(Parser, Debug)]
#[command(name = "chfilter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the graph fixture (TOML, or JSON by extension)
    #[arg(short, long, global = true, default_value = "graph.toml")]
    pub graph: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show graph and core summary
    Inspect,

    /// Evaluate one edge
    Check {
        /// Base node ID
        #[arg(short, long)]
        base: u64,

        /// Adjacent node ID (IDs past the node count are virtual)
        #[arg(short, long)]
        adjacent: u64,

        /// Treat the edge as a shortcut
        #[arg(short, long)]
        shortcut: bool,

        /// Evaluate in the in-core phase
        #[arg(long)]
        in_core: bool,
    },

    /// Evaluate every edge of the graph
    Sweep {
        /// Evaluate in the in-core phase
        #[arg(long)]
        in_core: bool,
    },

    /// Show the filter chain name
    Chain {
        /// Suffix appended to the chain name (repeatable)
        #[arg(long = "append-name")]
        append_name: Vec<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), FilterError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Inspect) | None => cmd_inspect(&cli.graph, json_mode),
        Some(Commands::Check {
            base,
            adjacent,
            shortcut,
            in_core,
        }) => cmd_check(&cli.graph, json_mode, base, adjacent, shortcut, in_core),
        Some(Commands::Sweep { in_core }) => cmd_sweep(&cli.graph, json_mode, cli.verbose, in_core),
        Some(Commands::Chain { append_name }) => cmd_chain(&cli.graph, json_mode, &append_name),
    }
}
