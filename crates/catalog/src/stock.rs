//! Stock mutation semantics.
//!
//! There is exactly one authoritative stock-mutation operation; callers pick
//! an explicit mode instead of guessing between "add a delta" and "replace".

use serde::{Deserialize, Serialize};

use stockbeads_core::{DomainError, DomainResult};

/// How a stock mutation interprets its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMode {
    /// Add a signed delta to the current quantity.
    Delta,
    /// Replace the current quantity with the supplied value.
    Absolute,
}

impl StockMode {
    /// Compute the resulting stock level. Stock can never go negative.
    pub fn apply(self, current: i64, quantity: i64) -> DomainResult<i64> {
        match self {
            StockMode::Delta => {
                let next = current
                    .checked_add(quantity)
                    .ok_or_else(|| DomainError::validation("stock quantity out of range"))?;
                if next < 0 {
                    return Err(DomainError::invariant("stock cannot go negative"));
                }
                Ok(next)
            }
            StockMode::Absolute => {
                if quantity < 0 {
                    return Err(DomainError::validation("stock must be non-negative"));
                }
                Ok(quantity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn delta_adds_to_current() {
        assert_eq!(StockMode::Delta.apply(10, -3).unwrap(), 7);
        assert_eq!(StockMode::Delta.apply(0, 5).unwrap(), 5);
    }

    #[test]
    fn delta_below_zero_is_rejected() {
        let err = StockMode::Delta.apply(3, -4).unwrap_err();
        assert_eq!(err.to_string(), "stock cannot go negative");
    }

    #[test]
    fn absolute_replaces() {
        assert_eq!(StockMode::Absolute.apply(42, 7).unwrap(), 7);
        assert!(StockMode::Absolute.apply(42, -1).is_err());
    }

    proptest! {
        /// Property: whenever apply succeeds, the result is non-negative.
        #[test]
        fn apply_never_yields_negative_stock(
            current in 0i64..1_000_000,
            quantity in -1_000_000i64..1_000_000,
            absolute in proptest::bool::ANY,
        ) {
            let mode = if absolute { StockMode::Absolute } else { StockMode::Delta };
            if let Ok(next) = mode.apply(current, quantity) {
                prop_assert!(next >= 0);
            }
        }
    }
}
