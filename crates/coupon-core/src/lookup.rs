//! # Lookup Collaborators
//!
//! The engine never reads products or coupons from storage itself. It asks a
//! lookup trait, and the caller decides what sits behind it.
//!
//! ## Contracts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductLookup::find_product_by_sku(sku)   → Some(Product) | None      │
//! │      used by: FreeGiftCalculator, order building in callers            │
//! │                                                                         │
//! │  CouponLookup::find_coupon_by_code(code)   → Some(Coupon)  | None      │
//! │      used by: redeem_coupon (callers resolve the coupon, not the       │
//! │      calculators)                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Retries, timeouts and caching belong to the implementation, not to the
//! engine. [`Catalog`] is the in-memory implementation used by the CLI and
//! by tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::CoreResult;
use crate::types::{Coupon, Product};
use crate::validation::{validate_coupon, validate_product};

// =============================================================================
// Traits
// =============================================================================

/// Resolves a product by SKU.
pub trait ProductLookup {
    fn find_product_by_sku(&self, sku: &str) -> Option<Product>;
}

/// Resolves a coupon by code.
pub trait CouponLookup {
    fn find_coupon_by_code(&self, code: &str) -> Option<Coupon>;
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn find_product_by_sku(&self, sku: &str) -> Option<Product> {
        (**self).find_product_by_sku(sku)
    }
}

impl<T: CouponLookup + ?Sized> CouponLookup for &T {
    fn find_coupon_by_code(&self, code: &str) -> Option<Coupon> {
        (**self).find_coupon_by_code(code)
    }
}

// =============================================================================
// Catalog Data
// =============================================================================

/// Serializable catalog contents, as read from a JSON or TOML file.
///
/// ## Example (JSON)
/// ```json
/// {
///   "products": [
///     { "sku": "A1", "category": "Snacks", "supplier": "Acme", "price_cents": 500 }
///   ],
///   "coupons": [
///     { "code": "TENOFF", "coupon_type": "whole_order_fixed", "amount": 1000 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Products keyed by SKU and coupons keyed by code, held in memory.
///
/// Inserting an existing key replaces the previous entry.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<String, Product>,
    coupons: HashMap<String, Coupon>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from loaded data, validating every entry.
    ///
    /// ## Errors
    /// The first invalid product or coupon aborts the load.
    pub fn from_data(data: CatalogData) -> CoreResult<Self> {
        let mut catalog = Catalog::new();
        for product in data.products {
            catalog.insert_product(product)?;
        }
        for coupon in data.coupons {
            catalog.insert_coupon(coupon)?;
        }
        debug!(
            products = catalog.products.len(),
            coupons = catalog.coupons.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Adds or replaces a product.
    pub fn insert_product(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;
        self.products.insert(product.sku.clone(), product);
        Ok(())
    }

    /// Adds or replaces a coupon.
    ///
    /// ## Errors
    /// Validation failure, or `MissingItemCode` for an item-keyed coupon
    /// without a target.
    pub fn insert_coupon(&mut self, coupon: Coupon) -> CoreResult<()> {
        validate_coupon(&coupon)?;
        if coupon.coupon_type.is_item_keyed() {
            coupon.item_code()?;
        }
        self.coupons.insert(coupon.code.clone(), coupon);
        Ok(())
    }

    /// Builder-style [`Catalog::insert_product`].
    pub fn with_product(mut self, product: Product) -> CoreResult<Self> {
        self.insert_product(product)?;
        Ok(self)
    }

    /// Builder-style [`Catalog::insert_coupon`].
    pub fn with_coupon(mut self, coupon: Coupon) -> CoreResult<Self> {
        self.insert_coupon(coupon)?;
        Ok(self)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn coupon_count(&self) -> usize {
        self.coupons.len()
    }
}

impl ProductLookup for Catalog {
    fn find_product_by_sku(&self, sku: &str) -> Option<Product> {
        self.products.get(sku.trim()).cloned()
    }
}

impl CouponLookup for Catalog {
    fn find_coupon_by_code(&self, code: &str) -> Option<Coupon> {
        self.coupons.get(code.trim()).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
