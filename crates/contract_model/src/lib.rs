//! # contract_model: Contract Model and Shortcode Codec
//!
//! ## Layer Role
//!
//! contract_model is the domain kernel of the workspace, providing:
//! - The contract type catalog (`catalog`)
//! - The reversible barrier transform (`barrier`)
//! - The shortcode codec (`shortcode`)
//! - The contract model with derived lifecycle attributes (`contract`)
//! - Error types (`error`)
//!
//! ## Design
//!
//! The codec and the model are pure: decoding, encoding, and every derived
//! attribute are functions of immutable inputs, with the single exception
//! of reading the present time at construction when no pricing instant is
//! supplied (injectable via [`contract_core::clock::Clock`]). Contracts
//! are safe to share across threads without synchronisation.
//!
//! Unrecognised and legacy shortcodes are represented, not rejected: they
//! decode to a fixed placeholder record so historical contracts remain
//! displayable. Check [`ContractParams::is_legacy`] (or match on
//! [`DecodedContract`]) before relying on full contract semantics.
//!
//! ## Usage Examples
//!
//! ```rust
//! use contract_core::clock::FixedClock;
//! use contract_core::types::Instant;
//! use contract_model::{Contract, ContractBuilder};
//!
//! let clock = FixedClock::new(Instant::from_epoch(1_000).unwrap());
//!
//! // Explicit construction
//! let contract = ContractBuilder::new()
//!     .contract_type("CALL")
//!     .underlying_symbol("frxUSDJPY")
//!     .currency("USD")
//!     .payout(100.0)
//!     .duration("5t")
//!     .barrier("S0P")
//!     .build_with_clock(&clock)
//!     .unwrap();
//!
//! // Encode, then reconstruct from the wire form
//! let shortcode = contract.shortcode().unwrap();
//! assert_eq!(shortcode, "CALL_FRXUSDJPY_100_1000_5T_S0P_0");
//!
//! let decoded = Contract::from_shortcode_with_clock(&shortcode, "USD", &clock).unwrap();
//! assert!(!decoded.is_legacy());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod barrier;
pub mod catalog;
pub mod contract;
pub mod error;
pub mod shortcode;

// Re-export the primary types at crate level
pub use barrier::BarrierValue;
pub use catalog::{BarrierCategory, ContractCategory, ExpiryKind, TypeMetadata};
pub use contract::{BarrierKind, Contract, ContractBuilder, DecodedContract, ExpiryType};
pub use error::ContractError;
pub use shortcode::{AmountType, ContractParams};
