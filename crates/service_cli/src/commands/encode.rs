//! Encode command implementation
//!
//! Builds a contract from explicit command-line fields and prints its
//! canonical shortcode.

use clap::Args;
use tracing::info;

use contract_core::types::Instant;
use contract_model::contract::ContractBuilder;

use crate::Result;

/// Arguments for the encode command.
#[derive(Args)]
pub struct EncodeArgs {
    /// Contract type code (e.g. CALL)
    #[arg(short = 't', long)]
    pub contract_type: String,

    /// Underlying asset symbol (e.g. frxUSDJPY)
    #[arg(short, long)]
    pub symbol: String,

    /// Payment currency
    #[arg(short, long)]
    pub currency: String,

    /// Payout amount
    #[arg(short, long)]
    pub payout: Option<f64>,

    /// Start time as Unix epoch seconds (defaults to now)
    #[arg(long)]
    pub start_epoch: Option<i64>,

    /// Absolute expiry time as Unix epoch seconds
    #[arg(long)]
    pub expiry_epoch: Option<i64>,

    /// Relative duration, e.g. 5t or 3h
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Single barrier, e.g. S0P or 1.2345
    #[arg(short, long)]
    pub barrier: Option<String>,

    /// High barrier for two-barrier contracts
    #[arg(long)]
    pub high_barrier: Option<String>,

    /// Low barrier for two-barrier contracts
    #[arg(long)]
    pub low_barrier: Option<String>,

    /// Mark the contract as forward-starting
    #[arg(long)]
    pub forward_starting: bool,
}

/// Run the encode command
pub fn run(args: &EncodeArgs) -> Result<()> {
    let mut builder = ContractBuilder::new()
        .contract_type(&args.contract_type)
        .underlying_symbol(&args.symbol)
        .currency(&args.currency);

    if let Some(payout) = args.payout {
        builder = builder.payout(payout);
    }
    if let Some(epoch) = args.start_epoch {
        builder = builder.date_start(Instant::from_epoch(epoch)?);
    }
    if let Some(epoch) = args.expiry_epoch {
        builder = builder.date_expiry(Instant::from_epoch(epoch)?);
    }
    if let Some(duration) = &args.duration {
        builder = builder.duration(duration);
    }
    if let Some(barrier) = &args.barrier {
        builder = builder.barrier(barrier);
    }
    if let Some(barrier) = &args.high_barrier {
        builder = builder.high_barrier(barrier);
    }
    if let Some(barrier) = &args.low_barrier {
        builder = builder.low_barrier(barrier);
    }
    if args.forward_starting {
        builder = builder.starts_as_forward_starting(true);
    }

    let contract = builder.build()?;
    info!("Contract built, encoding...");

    println!("{}", contract.shortcode()?);
    Ok(())
}
