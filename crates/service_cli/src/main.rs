//! Shortcode CLI - Command Line Tooling for Contract Shortcodes
//!
//! This is the operational entry point for the contract-rust workspace.
//!
//! # Commands
//!
//! - `shortcode inspect <SHORTCODE> --currency USD` - Decode a shortcode
//! - `shortcode encode --contract-type CALL ...` - Build and encode a contract
//! - `shortcode types` - List the contract type catalog
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate drives the
//! contract_model kernel from the command line and owns all terminal
//! output formatting.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Contract shortcode tooling
#[derive(Parser)]
#[command(name = "shortcode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a shortcode and show its parameters and derived attributes
    Inspect {
        /// The shortcode to decode
        shortcode: String,

        /// Payment currency (required to decode)
        #[arg(short, long)]
        currency: String,

        /// Pricing time as Unix epoch seconds (defaults to now)
        #[arg(short, long)]
        pricing_epoch: Option<i64>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Build a contract from explicit fields and print its shortcode
    Encode(commands::encode::EncodeArgs),

    /// List the contract type catalog
    Types,
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Inspect {
            shortcode,
            currency,
            pricing_epoch,
            format,
        } => commands::inspect::run(&shortcode, &currency, pricing_epoch, &format),
        Commands::Encode(args) => commands::encode::run(&args),
        Commands::Types => commands::types::run(),
    }
}
