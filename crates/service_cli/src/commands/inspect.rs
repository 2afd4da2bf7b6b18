//! Inspect command implementation
//!
//! Decodes a shortcode and prints the contract parameters together with
//! the derived lifecycle attributes.

use tracing::{info, warn};

use contract_core::clock::FixedClock;
use contract_core::types::Instant;
use contract_model::contract::{Contract, DecodedContract};
use contract_model::ContractParams;

use crate::{CliError, Result};

/// Run the inspect command
pub fn run(
    shortcode: &str,
    currency: &str,
    pricing_epoch: Option<i64>,
    format: &str,
) -> Result<()> {
    info!("Decoding shortcode: {}", shortcode);

    let decoded = match pricing_epoch {
        Some(epoch) => {
            let clock = FixedClock::new(Instant::from_epoch(epoch)?);
            Contract::from_shortcode_with_clock(shortcode, currency, &clock)?
        }
        None => Contract::from_shortcode(shortcode, currency)?,
    };

    if decoded.is_legacy() {
        warn!("Shortcode is unrecognised or legacy; showing the placeholder record");
    }

    match format {
        "json" => print_json(&decoded),
        "table" => {
            print_table(&decoded);
            Ok(())
        }
        other => Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, table",
            other
        ))),
    }
}

fn print_json(decoded: &DecodedContract) -> Result<()> {
    let value = match decoded {
        DecodedContract::Legacy(params) => legacy_json(params),
        DecodedContract::Contract(contract) => contract_json(contract),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn legacy_json(params: &ContractParams) -> serde_json::Value {
    serde_json::json!({
        "legacy": true,
        "code": params.code,
        "underlying_symbol": params.underlying_symbol,
        "currency": params.currency,
    })
}

fn contract_json(contract: &Contract) -> serde_json::Value {
    serde_json::json!({
        "legacy": false,
        "contract_type": contract.contract_type_code(),
        "category": contract.category().code(),
        "underlying_symbol": contract.underlying_symbol(),
        "currency": contract.currency(),
        "payout": contract.payout(),
        "date_start": contract.date_start().epoch(),
        "date_expiry": contract.date_expiry().map(|i| i.epoch()),
        "date_pricing": contract.date_pricing().epoch(),
        "fixed_expiry": contract.fixed_expiry(),
        "tick_expiry": contract.is_tick_expiry(),
        "tick_count": contract.tick_count(),
        "ticks_to_expiry": contract.ticks_to_expiry(),
        "barrier": contract.supplied_barrier(),
        "high_barrier": contract.supplied_high_barrier(),
        "low_barrier": contract.supplied_low_barrier(),
        "barrier_type": contract.supplied_barrier_type().code(),
        "barrier_category": contract.barrier_category().code(),
        "is_atm": contract.is_atm_bet(),
        "forward_starting": contract.is_forward_starting(),
        "starts_as_forward_starting": contract.starts_as_forward_starting(),
        "expiry_type": contract.expiry_type().to_string(),
        "time_in_days": contract.time_in_days(),
        "time_in_years": contract.time_in_years(),
        "remaining_seconds": contract.remaining_time().seconds(),
    })
}

fn print_table(decoded: &DecodedContract) {
    match decoded {
        DecodedContract::Legacy(params) => {
            println!("{:<28} {}", "Legacy placeholder", "yes");
            println!("{:<28} {}", "Code", params.code);
            println!("{:<28} {}", "Underlying", params.underlying_symbol);
            println!("{:<28} {}", "Currency", params.currency);
        }
        DecodedContract::Contract(contract) => {
            println!("{:<28} {}", "Contract type", contract.contract_type_code());
            println!("{:<28} {}", "Category", contract.category());
            println!("{:<28} {}", "Underlying", contract.underlying_symbol());
            println!("{:<28} {}", "Currency", contract.currency());
            if let Some(payout) = contract.payout() {
                println!("{:<28} {}", "Payout", payout);
            }
            println!("{:<28} {}", "Start epoch", contract.date_start().epoch());
            match contract.date_expiry() {
                Some(expiry) => println!("{:<28} {}", "Expiry epoch", expiry.epoch()),
                None => {
                    if let Some(count) = contract.tick_count() {
                        println!("{:<28} {}", "Tick count", count);
                    }
                }
            }
            println!("{:<28} {}", "Expiry type", contract.expiry_type());
            println!("{:<28} {}", "Fixed expiry", contract.fixed_expiry());
            if let Some(barrier) = contract.supplied_barrier() {
                println!("{:<28} {}", "Barrier", barrier);
            }
            if let (Some(high), Some(low)) = (
                contract.supplied_high_barrier(),
                contract.supplied_low_barrier(),
            ) {
                println!("{:<28} {}", "High barrier", high);
                println!("{:<28} {}", "Low barrier", low);
            }
            println!("{:<28} {}", "Barrier type", contract.supplied_barrier_type());
            println!("{:<28} {}", "Barrier category", contract.barrier_category());
            println!("{:<28} {}", "ATM", contract.is_atm_bet());
            println!("{:<28} {}", "Forward starting", contract.is_forward_starting());
            println!("{:<28} {:.6}", "Time in days", contract.time_in_days());
            println!("{:<28} {:.9}", "Time in years", contract.time_in_years());
            println!(
                "{:<28} {}",
                "Remaining seconds",
                contract.remaining_time().seconds()
            );
        }
    }
}
