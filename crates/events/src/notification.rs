use serde::Serialize;

/// A change notification broadcast to connected listeners.
///
/// Serializes as `{"event": <kind>, "data": {…}}`, matching the wire shape
/// listeners consume from the SSE stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Notification {
    /// Stock level changed for a product.
    StockUpdate { id: i64, name: String, stock: i64 },

    /// Stock fell below the product's own alert threshold.
    LowStockAlert {
        id: i64,
        name: String,
        stock: i64,
        message: String,
    },

    /// A sale was committed against a product.
    SaleCompleted {
        id: i64,
        product_id: i64,
        product_name: String,
        quantity_sold: i64,
        total_price: f64,
        remaining_stock: i64,
    },
}

impl Notification {
    /// Build the low-stock alert with its canonical message.
    pub fn low_stock(id: i64, name: &str, stock: i64) -> Self {
        Notification::LowStockAlert {
            id,
            name: name.to_string(),
            stock,
            message: format!("Low Stock: {name} has only {stock} left!"),
        }
    }

    /// Event kind as used for the SSE `event:` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::StockUpdate { .. } => "stock_update",
            Notification::LowStockAlert { .. } => "low_stock_alert",
            Notification::SaleCompleted { .. } => "sale_completed",
        }
    }

    /// The `data` payload without the enclosing tag.
    pub fn data(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(mut v) => v
                .as_object_mut()
                .and_then(|obj| obj.remove("data"))
                .unwrap_or(serde_json::Value::Null),
            Err(_) => serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shape_is_tagged() {
        let n = Notification::StockUpdate {
            id: 3,
            name: "Seed bead".to_string(),
            stock: 12,
        };
        assert_eq!(
            serde_json::to_value(&n).unwrap(),
            json!({"event": "stock_update", "data": {"id": 3, "name": "Seed bead", "stock": 12}})
        );
        assert_eq!(n.kind(), "stock_update");
        assert_eq!(n.data(), json!({"id": 3, "name": "Seed bead", "stock": 12}));
    }

    #[test]
    fn low_stock_message_names_product_and_count() {
        let n = Notification::low_stock(1, "Glass bead", 2);
        match n {
            Notification::LowStockAlert { message, .. } => {
                assert_eq!(message, "Low Stock: Glass bead has only 2 left!");
            }
            other => panic!("unexpected notification: {other:?}"),
        }
    }
}
