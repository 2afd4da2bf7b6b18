//! Types command implementation
//!
//! Lists the contract type catalog.

use contract_model::catalog;

use crate::Result;

/// Run the types command
pub fn run() -> Result<()> {
    println!(
        "{:<12} {:<13} {:<16} {:<10} {:<9} {:<8} {}",
        "CODE", "CATEGORY", "DISPLAY NAME", "SENTIMENT", "BARRIERS", "PATH", "EXPIRIES"
    );
    for meta in catalog::all_types() {
        let barriers = if meta.two_barriers() {
            "two"
        } else if meta.barrier_at_start {
            "one"
        } else {
            "none"
        };
        let expiries: Vec<String> = meta
            .supported_expiries
            .iter()
            .map(|kind| format!("{:?}", kind).to_lowercase())
            .collect();
        println!(
            "{:<12} {:<13} {:<16} {:<10} {:<9} {:<8} {}",
            meta.code,
            meta.category.code(),
            meta.display_name,
            meta.sentiment,
            barriers,
            if meta.is_path_dependent() { "yes" } else { "no" },
            expiries.join(",")
        );
    }
    Ok(())
}
