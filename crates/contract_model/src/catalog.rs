//! Contract type catalog.
//!
//! This module provides the static metadata behind every contract type code:
//! its category, payout structure, barrier behaviour, and supported expiry
//! kinds. Category behaviour is a pure lookup, not inheritance: everything
//! the model needs reduces to flags on [`ContractCategory`] and the
//! barrier-category table.
//!
//! # Examples
//!
//! ```
//! use contract_model::catalog::{self, ContractCategory};
//!
//! let call = catalog::lookup("CALL").unwrap();
//! assert_eq!(call.category, ContractCategory::CallPut);
//! assert!(call.allow_forward_starting());
//! assert!(!call.two_barriers());
//!
//! assert!(catalog::lookup("WIDGET").is_none());
//! ```

use std::fmt;

/// Barrier pricing category.
///
/// # Variants
/// - `EuroAtm`: European-style at-the-money barrier
/// - `EuroNonAtm`: European-style non-at-the-money barrier
/// - `American`: American-style (continuously monitored) barrier
/// - `NonFinancial`: Barrier over a non-price quantity (e.g. last digit)
/// - `Asian`: Barrier set by averaging over the contract lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BarrierCategory {
    /// European-style at-the-money barrier.
    EuroAtm,
    /// European-style non-at-the-money barrier.
    EuroNonAtm,
    /// American-style (continuously monitored) barrier.
    American,
    /// Barrier over a non-price quantity (e.g. last digit of the quote).
    NonFinancial,
    /// Barrier set by averaging over the contract lifetime.
    Asian,
}

impl BarrierCategory {
    /// Returns the wire code for this barrier category.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            BarrierCategory::EuroAtm => "euro_atm",
            BarrierCategory::EuroNonAtm => "euro_non_atm",
            BarrierCategory::American => "american",
            BarrierCategory::NonFinancial => "non_financial",
            BarrierCategory::Asian => "asian",
        }
    }
}

impl fmt::Display for BarrierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Contract category, carrying all category-level behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContractCategory {
    /// Rise/fall contracts (CALL, PUT).
    CallPut,
    /// Contracts settled on where the spot ends relative to two barriers.
    EndsInOut,
    /// One-touch / no-touch contracts.
    TouchNoTouch,
    /// Contracts settled on the spot staying inside/outside two barriers.
    StaysInOut,
    /// Last-digit contracts over tick quotes.
    Digits,
    /// Contracts settled against the average of tick quotes.
    Asian,
}

impl ContractCategory {
    /// Returns the wire code for this category.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            ContractCategory::CallPut => "callput",
            ContractCategory::EndsInOut => "endsinout",
            ContractCategory::TouchNoTouch => "touchnotouch",
            ContractCategory::StaysInOut => "staysinout",
            ContractCategory::Digits => "digits",
            ContractCategory::Asian => "asian",
        }
    }

    /// Returns whether contracts in this category carry two barriers.
    #[inline]
    pub fn two_barriers(&self) -> bool {
        matches!(
            self,
            ContractCategory::EndsInOut | ContractCategory::StaysInOut
        )
    }

    /// Returns whether settlement depends on the full price path rather
    /// than the final quote alone.
    #[inline]
    pub fn is_path_dependent(&self) -> bool {
        matches!(
            self,
            ContractCategory::TouchNoTouch | ContractCategory::StaysInOut | ContractCategory::Asian
        )
    }

    /// Returns whether contracts in this category may start in the future.
    #[inline]
    pub fn allow_forward_starting(&self) -> bool {
        matches!(self, ContractCategory::CallPut)
    }

    /// Returns the barrier pricing categories for this category, most
    /// specific first.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_model::catalog::{BarrierCategory, ContractCategory};
    ///
    /// assert_eq!(
    ///     ContractCategory::TouchNoTouch.barrier_categories(),
    ///     &[BarrierCategory::American]
    /// );
    /// ```
    pub fn barrier_categories(&self) -> &'static [BarrierCategory] {
        match self {
            ContractCategory::CallPut => &[BarrierCategory::EuroAtm, BarrierCategory::EuroNonAtm],
            ContractCategory::EndsInOut => &[BarrierCategory::EuroNonAtm],
            ContractCategory::TouchNoTouch => &[BarrierCategory::American],
            ContractCategory::StaysInOut => &[BarrierCategory::American],
            ContractCategory::Digits => &[BarrierCategory::NonFinancial],
            ContractCategory::Asian => &[BarrierCategory::Asian],
        }
    }
}

impl fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Supported expiry kind for a contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExpiryKind {
    /// Expiry within the trading day.
    Intraday,
    /// Expiry at one or more days out.
    Daily,
    /// Expiry after a fixed number of ticks.
    Tick,
}

/// Payout structure of a contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PayoutType {
    /// Fixed payout on a win, nothing otherwise.
    Binary,
    /// Payout varies with the settlement level.
    NonBinary,
}

/// When a winning contract pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PayoutTime {
    /// Pays at expiry.
    End,
    /// Pays as soon as the winning condition is hit.
    Hit,
}

/// Static metadata record for one contract type code.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeMetadata {
    /// Stable numeric identifier.
    pub id: u32,
    /// Canonical contract type code, e.g. `CALL`.
    pub code: &'static str,
    /// Short code used by pricing engines.
    pub pricing_code: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Direction or condition the buyer is backing.
    pub sentiment: &'static str,
    /// Code of the opposite-side contract, when one exists.
    pub other_side_code: Option<&'static str>,
    /// The contract category this type belongs to.
    pub category: ContractCategory,
    /// Payout structure.
    pub payout_type: PayoutType,
    /// When a winning contract pays out.
    pub payout_time: PayoutTime,
    /// Whether the barrier is fixed when the contract starts.
    pub barrier_at_start: bool,
    /// Expiry kinds this type supports.
    pub supported_expiries: &'static [ExpiryKind],
}

impl TypeMetadata {
    /// Returns whether this type carries two barriers. Delegates to the
    /// category.
    #[inline]
    pub fn two_barriers(&self) -> bool {
        self.category.two_barriers()
    }

    /// Returns whether settlement depends on the full price path.
    #[inline]
    pub fn is_path_dependent(&self) -> bool {
        self.category.is_path_dependent()
    }

    /// Returns whether this type may start in the future.
    #[inline]
    pub fn allow_forward_starting(&self) -> bool {
        self.category.allow_forward_starting()
    }

    /// Returns whether this type supports the given expiry kind.
    #[inline]
    pub fn supports_expiry(&self, kind: ExpiryKind) -> bool {
        self.supported_expiries.contains(&kind)
    }
}

const TIMED_AND_TICK: &[ExpiryKind] = &[ExpiryKind::Intraday, ExpiryKind::Daily, ExpiryKind::Tick];
const TIMED_ONLY: &[ExpiryKind] = &[ExpiryKind::Intraday, ExpiryKind::Daily];
const TICK_ONLY: &[ExpiryKind] = &[ExpiryKind::Tick];

/// The full contract type catalog.
static CATALOG: &[TypeMetadata] = &[
    TypeMetadata {
        id: 1,
        code: "CALL",
        pricing_code: "C",
        display_name: "Higher",
        sentiment: "up",
        other_side_code: Some("PUT"),
        category: ContractCategory::CallPut,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TIMED_AND_TICK,
    },
    TypeMetadata {
        id: 2,
        code: "PUT",
        pricing_code: "P",
        display_name: "Lower",
        sentiment: "down",
        other_side_code: Some("CALL"),
        category: ContractCategory::CallPut,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TIMED_AND_TICK,
    },
    TypeMetadata {
        id: 3,
        code: "EXPIRYRANGE",
        pricing_code: "ER",
        display_name: "Ends Between",
        sentiment: "in",
        other_side_code: Some("EXPIRYMISS"),
        category: ContractCategory::EndsInOut,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TIMED_ONLY,
    },
    TypeMetadata {
        id: 4,
        code: "EXPIRYMISS",
        pricing_code: "EM",
        display_name: "Ends Outside",
        sentiment: "out",
        other_side_code: Some("EXPIRYRANGE"),
        category: ContractCategory::EndsInOut,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TIMED_ONLY,
    },
    TypeMetadata {
        id: 5,
        code: "RANGE",
        pricing_code: "R",
        display_name: "Stays Between",
        sentiment: "in",
        other_side_code: Some("UPORDOWN"),
        category: ContractCategory::StaysInOut,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TIMED_ONLY,
    },
    TypeMetadata {
        id: 6,
        code: "UPORDOWN",
        pricing_code: "UO",
        display_name: "Goes Outside",
        sentiment: "out",
        other_side_code: Some("RANGE"),
        category: ContractCategory::StaysInOut,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::Hit,
        barrier_at_start: true,
        supported_expiries: TIMED_ONLY,
    },
    TypeMetadata {
        id: 7,
        code: "ONETOUCH",
        pricing_code: "OT",
        display_name: "Touches",
        sentiment: "touch",
        other_side_code: Some("NOTOUCH"),
        category: ContractCategory::TouchNoTouch,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::Hit,
        barrier_at_start: true,
        supported_expiries: TIMED_ONLY,
    },
    TypeMetadata {
        id: 8,
        code: "NOTOUCH",
        pricing_code: "NT",
        display_name: "Does Not Touch",
        sentiment: "notouch",
        other_side_code: Some("ONETOUCH"),
        category: ContractCategory::TouchNoTouch,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TIMED_ONLY,
    },
    TypeMetadata {
        id: 9,
        code: "DIGITMATCH",
        pricing_code: "DM",
        display_name: "Digit Matches",
        sentiment: "match",
        other_side_code: Some("DIGITDIFF"),
        category: ContractCategory::Digits,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TICK_ONLY,
    },
    TypeMetadata {
        id: 10,
        code: "DIGITDIFF",
        pricing_code: "DD",
        display_name: "Digit Differs",
        sentiment: "differ",
        other_side_code: Some("DIGITMATCH"),
        category: ContractCategory::Digits,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TICK_ONLY,
    },
    TypeMetadata {
        id: 11,
        code: "DIGITOVER",
        pricing_code: "DO",
        display_name: "Digit Over",
        sentiment: "over",
        other_side_code: Some("DIGITUNDER"),
        category: ContractCategory::Digits,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TICK_ONLY,
    },
    TypeMetadata {
        id: 12,
        code: "DIGITUNDER",
        pricing_code: "DU",
        display_name: "Digit Under",
        sentiment: "under",
        other_side_code: Some("DIGITOVER"),
        category: ContractCategory::Digits,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: true,
        supported_expiries: TICK_ONLY,
    },
    TypeMetadata {
        id: 13,
        code: "DIGITEVEN",
        pricing_code: "DE",
        display_name: "Digit Even",
        sentiment: "even",
        other_side_code: Some("DIGITODD"),
        category: ContractCategory::Digits,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: false,
        supported_expiries: TICK_ONLY,
    },
    TypeMetadata {
        id: 14,
        code: "DIGITODD",
        pricing_code: "DOD",
        display_name: "Digit Odd",
        sentiment: "odd",
        other_side_code: Some("DIGITEVEN"),
        category: ContractCategory::Digits,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: false,
        supported_expiries: TICK_ONLY,
    },
    TypeMetadata {
        id: 15,
        code: "ASIANU",
        pricing_code: "AU",
        display_name: "Asian Up",
        sentiment: "up",
        other_side_code: Some("ASIAND"),
        category: ContractCategory::Asian,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: false,
        supported_expiries: TICK_ONLY,
    },
    TypeMetadata {
        id: 16,
        code: "ASIAND",
        pricing_code: "AD",
        display_name: "Asian Down",
        sentiment: "down",
        other_side_code: Some("ASIANU"),
        category: ContractCategory::Asian,
        payout_type: PayoutType::Binary,
        payout_time: PayoutTime::End,
        barrier_at_start: false,
        supported_expiries: TICK_ONLY,
    },
];

/// Looks up the metadata record for a contract type code.
///
/// Codes are exact upper-case matches; legacy aliases are resolved by the
/// shortcode codec before lookup.
///
/// # Examples
///
/// ```
/// use contract_model::catalog;
///
/// assert!(catalog::lookup("ONETOUCH").is_some());
/// assert!(catalog::lookup("call").is_none());
/// ```
pub fn lookup(code: &str) -> Option<&'static TypeMetadata> {
    CATALOG.iter().find(|meta| meta.code == code)
}

/// Returns all contract type codes in the catalog.
pub fn all_type_codes() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|meta| meta.code)
}

/// Returns all catalog records.
pub fn all_types() -> impl Iterator<Item = &'static TypeMetadata> {
    CATALOG.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        for code in [
            "CALL",
            "PUT",
            "EXPIRYRANGE",
            "EXPIRYMISS",
            "RANGE",
            "UPORDOWN",
            "ONETOUCH",
            "NOTOUCH",
            "DIGITMATCH",
            "DIGITDIFF",
            "DIGITOVER",
            "DIGITUNDER",
            "DIGITEVEN",
            "DIGITODD",
            "ASIANU",
            "ASIAND",
        ] {
            let meta = lookup(code).unwrap_or_else(|| panic!("missing {}", code));
            assert_eq!(meta.code, code);
        }
    }

    #[test]
    fn test_lookup_unknown_code() {
        assert!(lookup("WIDGET").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("call").is_none());
    }

    #[test]
    fn test_ids_and_codes_are_unique() {
        use std::collections::HashSet;

        let ids: HashSet<u32> = all_types().map(|m| m.id).collect();
        assert_eq!(ids.len(), all_types().count());

        let codes: HashSet<&str> = all_type_codes().collect();
        assert_eq!(codes.len(), all_types().count());
    }

    #[test]
    fn test_other_side_codes_resolve() {
        for meta in all_types() {
            if let Some(other) = meta.other_side_code {
                let other_meta = lookup(other)
                    .unwrap_or_else(|| panic!("{} names missing other side {}", meta.code, other));
                assert_eq!(other_meta.other_side_code, Some(meta.code));
                assert_eq!(other_meta.category, meta.category);
            }
        }
    }

    #[test]
    fn test_two_barrier_categories() {
        assert!(lookup("EXPIRYRANGE").unwrap().two_barriers());
        assert!(lookup("RANGE").unwrap().two_barriers());
        assert!(!lookup("CALL").unwrap().two_barriers());
        assert!(!lookup("ONETOUCH").unwrap().two_barriers());
    }

    #[test]
    fn test_path_dependence() {
        assert!(lookup("ONETOUCH").unwrap().is_path_dependent());
        assert!(lookup("RANGE").unwrap().is_path_dependent());
        assert!(lookup("ASIANU").unwrap().is_path_dependent());
        assert!(!lookup("CALL").unwrap().is_path_dependent());
        assert!(!lookup("DIGITOVER").unwrap().is_path_dependent());
    }

    #[test]
    fn test_forward_starting_is_callput_only() {
        for meta in all_types() {
            assert_eq!(
                meta.allow_forward_starting(),
                meta.category == ContractCategory::CallPut,
                "{}",
                meta.code
            );
        }
    }

    #[test]
    fn test_barrier_category_table() {
        assert_eq!(
            ContractCategory::CallPut.barrier_categories(),
            &[BarrierCategory::EuroAtm, BarrierCategory::EuroNonAtm]
        );
        assert_eq!(
            ContractCategory::EndsInOut.barrier_categories(),
            &[BarrierCategory::EuroNonAtm]
        );
        assert_eq!(
            ContractCategory::TouchNoTouch.barrier_categories(),
            &[BarrierCategory::American]
        );
        assert_eq!(
            ContractCategory::StaysInOut.barrier_categories(),
            &[BarrierCategory::American]
        );
        assert_eq!(
            ContractCategory::Digits.barrier_categories(),
            &[BarrierCategory::NonFinancial]
        );
        assert_eq!(
            ContractCategory::Asian.barrier_categories(),
            &[BarrierCategory::Asian]
        );
    }

    #[test]
    fn test_tick_only_types() {
        for code in ["DIGITMATCH", "DIGITEVEN", "ASIANU", "ASIAND"] {
            let meta = lookup(code).unwrap();
            assert!(meta.supports_expiry(ExpiryKind::Tick));
            assert!(!meta.supports_expiry(ExpiryKind::Daily));
        }
    }

    #[test]
    fn test_callput_supports_all_expiries() {
        let call = lookup("CALL").unwrap();
        assert!(call.supports_expiry(ExpiryKind::Intraday));
        assert!(call.supports_expiry(ExpiryKind::Daily));
        assert!(call.supports_expiry(ExpiryKind::Tick));
    }

    #[test]
    fn test_display_codes() {
        assert_eq!(format!("{}", ContractCategory::CallPut), "callput");
        assert_eq!(format!("{}", BarrierCategory::EuroAtm), "euro_atm");
    }
}
