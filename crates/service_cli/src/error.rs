//! CLI error types.

use thiserror::Error;

use contract_core::types::TimeError;
use contract_model::ContractError;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// A contract could not be decoded, built, or encoded.
    #[error("contract error: {0}")]
    Contract(#[from] ContractError),

    /// A supplied instant was invalid.
    #[error("time error: {0}")]
    Time(#[from] TimeError),

    /// A command-line argument was not usable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON output could not be produced.
    #[error("serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
