//! Integration tests for crate exports.
//!
//! Verify that the public modules and types are accessible via absolute
//! paths, and that the crate-level re-exports stay in sync with their
//! defining modules.

use contract_core::clock::FixedClock;
use contract_core::types::Instant;

/// Test that the catalog module is accessible via absolute path.
#[test]
fn test_catalog_module_exports() {
    use contract_model::catalog::{all_type_codes, lookup, ContractCategory};

    let call = lookup("CALL").unwrap();
    assert_eq!(call.category, ContractCategory::CallPut);
    assert!(all_type_codes().any(|code| code == "DIGITODD"));
}

/// Test that the barrier transform is accessible via absolute path.
#[test]
fn test_barrier_module_exports() {
    use contract_model::barrier::{from_shortcode, to_shortcode, BarrierValue, BARRIER_SCALE};

    assert_eq!(BARRIER_SCALE, 1_000_000.0);
    let value = from_shortcode("1234500", "CALL");
    assert_eq!(value, BarrierValue::Numeric(1.2345));
    assert_eq!(to_shortcode(&value, "CALL"), "1234500");
}

/// Test that the crate-level re-exports match the module definitions.
#[test]
fn test_crate_level_reexports() {
    let clock = FixedClock::new(Instant::from_epoch(1_000).unwrap());

    let contract = contract_model::ContractBuilder::new()
        .contract_type("CALL")
        .underlying_symbol("frxUSDJPY")
        .currency("USD")
        .payout(100.0)
        .duration("5t")
        .barrier("S0P")
        .build_with_clock(&clock)
        .unwrap();

    let _category: contract_model::BarrierCategory = contract.barrier_category();
    let _kind: contract_model::BarrierKind = contract.supplied_barrier_type();
    let _expiry: contract_model::ExpiryType = contract.expiry_type();

    let params: contract_model::ContractParams =
        contract_model::shortcode::decode(&contract.shortcode().unwrap(), "USD").unwrap();
    assert_eq!(params.amount_type, contract_model::AmountType::Payout);
}

/// Test that decode errors surface through the re-exported error type.
#[test]
fn test_error_reexport() {
    let err: contract_model::ContractError =
        contract_model::shortcode::decode("CALL_frxUSDJPY_100_1000_2000_S0P_0", "").unwrap_err();
    assert_eq!(err, contract_model::ContractError::MissingCurrency);
}
