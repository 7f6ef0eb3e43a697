use serde::{Deserialize, Serialize};

use stockbeads_core::{DomainError, DomainResult};

/// Validated input for recording a sale.
///
/// A sale is immutable once recorded; there is deliberately no patch type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub product_id: i64,
    pub quantity_sold: i64,
    pub total_price: f64,
    pub payment_method: String,
    pub sale_status: String,
}

impl NewSale {
    /// Validate raw request fields. Required fields are reported one at a
    /// time, in declaration order, as `Missing field: x`.
    pub fn from_parts(
        product_id: Option<i64>,
        quantity_sold: Option<i64>,
        total_price: Option<f64>,
        payment_method: Option<String>,
        sale_status: Option<String>,
    ) -> DomainResult<Self> {
        let product_id = product_id.ok_or_else(|| DomainError::missing_field("product_id"))?;
        let quantity_sold =
            quantity_sold.ok_or_else(|| DomainError::missing_field("quantity_sold"))?;
        let total_price = total_price.ok_or_else(|| DomainError::missing_field("total_price"))?;
        let payment_method =
            payment_method.ok_or_else(|| DomainError::missing_field("payment_method"))?;
        let sale_status = sale_status.ok_or_else(|| DomainError::missing_field("sale_status"))?;

        if quantity_sold <= 0 {
            return Err(DomainError::validation("quantity_sold must be positive"));
        }

        Ok(Self {
            product_id,
            quantity_sold,
            total_price,
            payment_method,
            sale_status,
        })
    }
}

/// Per-unit price of a sale; zero when the quantity is zero.
pub fn unit_price(total_price: f64, quantity_sold: i64) -> f64 {
    if quantity_sold > 0 {
        total_price / quantity_sold as f64
    } else {
        0.0
    }
}

/// Profit relative to the product's listed selling price.
pub fn profit(total_price: f64, selling_price: f64, quantity_sold: i64) -> f64 {
    total_price - selling_price * quantity_sold as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_reported_in_order() {
        let err = NewSale::from_parts(None, None, None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: product_id");

        let err = NewSale::from_parts(Some(1), Some(2), Some(3.0), None, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: payment_method");
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        for qty in [0, -5] {
            let err = NewSale::from_parts(
                Some(1),
                Some(qty),
                Some(10.0),
                Some("cash".into()),
                Some("completed".into()),
            )
            .unwrap_err();
            assert_eq!(err.to_string(), "quantity_sold must be positive");
        }
    }

    #[test]
    fn unit_price_handles_zero_quantity() {
        assert_eq!(unit_price(30.0, 3), 10.0);
        assert_eq!(unit_price(30.0, 0), 0.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: validation preserves all accepted fields verbatim.
            #[test]
            fn accepted_sales_round_trip(
                product_id in 1i64..10_000,
                quantity in 1i64..10_000,
                total in 0.0f64..100_000.0,
            ) {
                let sale = NewSale::from_parts(
                    Some(product_id),
                    Some(quantity),
                    Some(total),
                    Some("cash".into()),
                    Some("pending".into()),
                )
                .unwrap();
                prop_assert_eq!(sale.product_id, product_id);
                prop_assert_eq!(sale.quantity_sold, quantity);
                prop_assert_eq!(sale.total_price, total);
            }

            /// Property: profit plus cost-of-goods always recovers the total.
            #[test]
            fn profit_is_consistent_with_unit_math(
                quantity in 1i64..10_000,
                selling_price in 0.0f64..1_000.0,
                total in 0.0f64..100_000.0,
            ) {
                let p = profit(total, selling_price, quantity);
                let recovered = p + selling_price * quantity as f64;
                prop_assert!((recovered - total).abs() < 1e-6);
            }
        }
    }
}
