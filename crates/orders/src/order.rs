use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockbeads_core::{DomainError, DomainResult};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_FULFILLED: &str = "fulfilled";

/// A structured order line referencing a product with a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Customer order record.
///
/// `products_ordered` is a free-form payload kept verbatim; `items` is the
/// structured association that the fulfill operation consumes. Creating an
/// order never touches stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub order_status: String,
    pub order_date: DateTime<Utc>,
    pub shipping_info: Option<String>,
    pub products_ordered: Value,
    pub items: Vec<OrderItem>,
}

/// Validated input for creating an order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub order_status: String,
    pub shipping_info: Option<String>,
    pub products_ordered: Value,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    pub fn from_parts(
        customer_name: Option<String>,
        products_ordered: Option<Value>,
        order_status: Option<String>,
        shipping_info: Option<String>,
        items: Option<Vec<OrderItem>>,
    ) -> DomainResult<Self> {
        let customer_name =
            customer_name.ok_or_else(|| DomainError::missing_field("customer_name"))?;
        if customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer_name cannot be empty"));
        }

        let items = items.unwrap_or_default();
        for item in &items {
            if item.quantity <= 0 {
                return Err(DomainError::validation("order item quantity must be positive"));
            }
        }
        let mut seen: Vec<i64> = items.iter().map(|i| i.product_id).collect();
        seen.sort_unstable();
        if seen.windows(2).any(|w| w[0] == w[1]) {
            return Err(DomainError::validation("duplicate product in order items"));
        }

        Ok(Self {
            customer_name,
            order_status: order_status.unwrap_or_else(|| STATUS_PENDING.to_string()),
            shipping_info,
            products_ordered: products_ordered.unwrap_or(Value::Null),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_name_is_required() {
        let err = NewOrder::from_parts(None, None, None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: customer_name");
    }

    #[test]
    fn status_defaults_to_pending() {
        let order = NewOrder::from_parts(
            Some("Ada".into()),
            Some(json!({"note": "two strands"})),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(order.order_status, STATUS_PENDING);
        assert!(order.items.is_empty());
    }

    #[test]
    fn item_quantities_must_be_positive() {
        let err = NewOrder::from_parts(
            Some("Ada".into()),
            None,
            None,
            None,
            Some(vec![OrderItem { product_id: 1, quantity: 0 }]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "order item quantity must be positive");
    }

    #[test]
    fn duplicate_items_are_rejected() {
        let err = NewOrder::from_parts(
            Some("Ada".into()),
            None,
            None,
            None,
            Some(vec![
                OrderItem { product_id: 7, quantity: 1 },
                OrderItem { product_id: 7, quantity: 2 },
            ]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "duplicate product in order items");
    }
}
