//! # Input Files
//!
//! Reads the catalog and the order request, and turns the request into an
//! [`Order`] by resolving every SKU through the catalog.
//!
//! ## Order Request Format
//! ```json
//! {
//!   "lines": [
//!     { "sku": "A1", "quantity": 3 },
//!     { "sku": "B2", "quantity": 1 }
//!   ]
//! }
//! ```

use std::path::Path;

use coupon_core::{Catalog, CatalogData, CoreError, Order, ProductLookup};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

// =============================================================================
// Catalog
// =============================================================================

/// Catalog file encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// `.toml` files are TOML, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => CatalogFormat::Toml,
            _ => CatalogFormat::Json,
        }
    }
}

/// Parses and validates catalog contents.
pub fn parse_catalog(contents: &str, format: CatalogFormat) -> CliResult<Catalog> {
    let data: CatalogData = match format {
        CatalogFormat::Json => serde_json::from_str(contents)?,
        CatalogFormat::Toml => toml::from_str(contents)?,
    };
    Ok(Catalog::from_data(data)?)
}

/// Reads a catalog file from disk.
pub fn load_catalog(path: &Path) -> CliResult<Catalog> {
    let contents = read_file(path)?;
    let catalog = parse_catalog(&contents, CatalogFormat::from_path(path))?;
    debug!(
        path = %path.display(),
        products = catalog.product_count(),
        coupons = catalog.coupon_count(),
        "Catalog file loaded"
    );
    Ok(catalog)
}

// =============================================================================
// Order Request
// =============================================================================

/// One requested line: a SKU and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequestLine {
    pub sku: String,
    pub quantity: i64,
}

/// The order as submitted by the customer, before SKUs are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub lines: Vec<OrderRequestLine>,
}

impl OrderRequest {
    pub fn from_json(contents: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Builds an order, resolving each SKU through `products`.
    ///
    /// ## Errors
    /// `ProductNotFound` for an unknown SKU, validation error for a
    /// non-positive quantity.
    pub fn build_order(&self, products: &dyn ProductLookup) -> CliResult<Order> {
        let mut order = Order::new();
        for line in &self.lines {
            let product = products
                .find_product_by_sku(&line.sku)
                .ok_or_else(|| CoreError::ProductNotFound(line.sku.clone()))?;
            order.add_line(product, line.quantity)?;
        }
        debug!(order_id = %order.id(), lines = self.lines.len(), total = %order.total(), "Order built");
        Ok(order)
    }
}

/// Reads an order request file from disk.
pub fn load_order_request(path: &Path) -> CliResult<OrderRequest> {
    OrderRequest::from_json(&read_file(path)?)
}

fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_core::{CouponLookup, CouponType};
    use std::path::PathBuf;

    const CATALOG_TOML: &str = r#"
        [[products]]
        sku = "A1"
        category = "Snacks"
        supplier = "Acme"
        price_cents = 500

        [[products]]
        sku = "G1"
        category = "Gifts"
        supplier = "Initech"
        price_cents = 1500

        [[coupons]]
        code = "A1OFF"
        coupon_type = "specific_product"
        item_code = "A1"
        amount = 100
    "#;

    #[test]
    fn test_catalog_format_from_path() {
        assert_eq!(CatalogFormat::from_path(Path::new("c.toml")), CatalogFormat::Toml);
        assert_eq!(CatalogFormat::from_path(Path::new("c.TOML")), CatalogFormat::Toml);
        assert_eq!(CatalogFormat::from_path(Path::new("c.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), CatalogFormat::Json);
    }

    #[test]
    fn test_parse_toml_catalog() {
        let catalog = parse_catalog(CATALOG_TOML, CatalogFormat::Toml).unwrap();

        assert_eq!(catalog.product_count(), 2);
        let coupon = catalog.find_coupon_by_code("A1OFF").unwrap();
        assert_eq!(coupon.coupon_type, CouponType::SpecificProduct);
    }

    #[test]
    fn test_parse_catalog_rejects_invalid_product() {
        let json = r#"{ "products": [ { "sku": "A1", "category": "x", "supplier": "y", "price_cents": -1 } ] }"#;
        let err = parse_catalog(json, CatalogFormat::Json).unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_build_order() {
        let catalog = parse_catalog(CATALOG_TOML, CatalogFormat::Toml).unwrap();
        let request = OrderRequest::from_json(
            r#"{ "lines": [ { "sku": "A1", "quantity": 3 }, { "sku": "G1", "quantity": 1 } ] }"#,
        )
        .unwrap();

        let order = request.build_order(&catalog).unwrap();

        assert_eq!(order.order_lines().len(), 2);
        assert_eq!(order.total().cents(), 3000);
    }

    #[test]
    fn test_build_order_unknown_sku() {
        let catalog = parse_catalog(CATALOG_TOML, CatalogFormat::Toml).unwrap();
        let request = OrderRequest {
            lines: vec![OrderRequestLine {
                sku: "ZZ".to_string(),
                quantity: 1,
            }],
        };

        let err = request.build_order(&catalog).unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::ProductNotFound(sku)) if sku == "ZZ"));
    }

    #[test]
    fn test_build_order_rejects_zero_quantity() {
        let catalog = parse_catalog(CATALOG_TOML, CatalogFormat::Toml).unwrap();
        let request = OrderRequest {
            lines: vec![OrderRequestLine {
                sku: "A1".to_string(),
                quantity: 0,
            }],
        };

        assert!(request.build_order(&catalog).is_err());
    }

    #[test]
    fn test_build_order_rejects_overflowing_quantity() {
        let catalog = parse_catalog(CATALOG_TOML, CatalogFormat::Toml).unwrap();
        let request = OrderRequest::from_json(
            r#"{ "lines": [ { "sku": "G1", "quantity": 9000000000000000000 } ] }"#,
        )
        .unwrap();

        let err = request.build_order(&catalog).unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::AmountOverflow(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_order_request(&PathBuf::from("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
