use serde::{Deserialize, Serialize};

use stockbeads_core::{DomainError, DomainResult};

/// Alert threshold applied when a product is created without one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Product record as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub size: Option<String>,
    pub stock_quantity: i64,
    pub selling_price: f64,
    pub low_stock_threshold: i64,
}

impl Product {
    /// Low-stock check against the product's own threshold, never a literal.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity < self.low_stock_threshold
    }
}

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category_id: i64,
    pub size: Option<String>,
    pub stock_quantity: i64,
    pub selling_price: f64,
    pub low_stock_threshold: i64,
}

impl NewProduct {
    /// Validate raw request fields. Required fields are reported one at a
    /// time, in declaration order, as `Missing field: x`.
    pub fn from_parts(
        name: Option<String>,
        category_id: Option<i64>,
        size: Option<String>,
        stock_quantity: Option<i64>,
        selling_price: Option<f64>,
        low_stock_threshold: Option<i64>,
    ) -> DomainResult<Self> {
        let name = name.ok_or_else(|| DomainError::missing_field("name"))?;
        let category_id = category_id.ok_or_else(|| DomainError::missing_field("category_id"))?;
        let stock_quantity =
            stock_quantity.ok_or_else(|| DomainError::missing_field("stock_quantity"))?;
        let selling_price =
            selling_price.ok_or_else(|| DomainError::missing_field("selling_price"))?;
        let low_stock_threshold = low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if stock_quantity < 0 {
            return Err(DomainError::validation("stock_quantity must be non-negative"));
        }
        if low_stock_threshold < 0 {
            return Err(DomainError::validation("low_stock_threshold must be non-negative"));
        }

        Ok(Self {
            name,
            category_id,
            size,
            stock_quantity,
            selling_price,
            low_stock_threshold,
        })
    }
}

/// Partial update; absent fields keep their stored values.
///
/// Stock is not patchable: every stock mutation goes through the stock
/// adjuster so listeners see a notification for each change.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub size: Option<String>,
    pub selling_price: Option<f64>,
    pub low_stock_threshold: Option<i64>,
}

impl ProductPatch {
    /// Merge this patch onto an existing product. `stock_quantity` always
    /// carries over unchanged.
    pub fn apply_to(&self, product: &Product) -> Product {
        Product {
            id: product.id,
            name: self.name.clone().unwrap_or_else(|| product.name.clone()),
            category_id: self.category_id.unwrap_or(product.category_id),
            size: self.size.clone().or_else(|| product.size.clone()),
            stock_quantity: product.stock_quantity,
            selling_price: self.selling_price.unwrap_or(product.selling_price),
            low_stock_threshold: self.low_stock_threshold.unwrap_or(product.low_stock_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, threshold: i64) -> Product {
        Product {
            id: 1,
            name: "Glass bead 6mm".to_string(),
            category_id: 1,
            size: Some("6mm".to_string()),
            stock_quantity: stock,
            selling_price: 2.5,
            low_stock_threshold: threshold,
        }
    }

    #[test]
    fn low_stock_uses_per_product_threshold() {
        assert!(product(2, 10).is_low_stock());
        assert!(!product(10, 10).is_low_stock());
        assert!(!product(2, 1).is_low_stock());
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let err = NewProduct::from_parts(None, None, None, None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: name");

        let err =
            NewProduct::from_parts(Some("Bead".into()), None, None, None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: category_id");
    }

    #[test]
    fn threshold_defaults_to_ten() {
        let p = NewProduct::from_parts(
            Some("Bead".into()),
            Some(1),
            None,
            Some(5),
            Some(1.0),
            None,
        )
        .unwrap();
        assert_eq!(p.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn negative_stock_is_rejected() {
        let err = NewProduct::from_parts(
            Some("Bead".into()),
            Some(1),
            None,
            Some(-1),
            Some(1.0),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let base = product(5, 10);
        let patch = ProductPatch {
            selling_price: Some(3.0),
            ..ProductPatch::default()
        };
        let merged = patch.apply_to(&base);
        assert_eq!(merged.selling_price, 3.0);
        assert_eq!(merged.name, base.name);
        assert_eq!(merged.stock_quantity, base.stock_quantity);
    }

    #[test]
    fn patch_cannot_carry_stock() {
        // A stock_quantity key in the payload is dropped, not applied.
        let patch: ProductPatch =
            serde_json::from_str(r#"{"name": "Renamed", "stock_quantity": 99}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Renamed"));

        let merged = patch.apply_to(&product(5, 10));
        assert_eq!(merged.name, "Renamed");
        assert_eq!(merged.stock_quantity, 5);
    }
}
