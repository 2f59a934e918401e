//! Lettergen: render one LaTeX letter per recipient and compile them to PDF.
//!
//! # Usage
//!
//! ```text
//! lettergen init [DIR] [--force]
//! lettergen build [--project DIR] [--output DIR] [--compiler PROG] [--defaults] [--dry-run] [--json]
//! ```
//!
//! `-v`/`-vv` raise the log level to debug/trace, `-q` lowers it to warn.
//! `RUST_LOG` overrides both.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{build::BuildArgs, init::InitArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "lettergen",
    version,
    about = "Generate serial letters from a LaTeX template and JSON data",
    long_about = None,
)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a new letter project.
    Init(InitArgs),

    /// Render, compile and collect one PDF per recipient.
    Build(BuildArgs),
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn default_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Build(args) => args.run(),
    }
}
