//! # Validation Module
//!
//! Input validation for catalog data and coupons.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog load ──► validate_product / validate_coupon                   │
//! │                                                                         │
//! │  Order building ──► validate_product / validate_quantity (add_line)    │
//! │                                                                         │
//! │  apply_coupon ──► validate_coupon (before any calculator runs)         │
//! │                                                                         │
//! │  A coupon that fails validation never touches the order.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::validation::{validate_sku, validate_quantity};
//!
//! assert!(validate_sku("COKE-330").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Coupon, CouponType, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for a percentage coupon: 10000 bps = 100%.
pub const MAX_RATE_BPS: i64 = 10_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores (so no surrounding
///   whitespace: lookups trim their query, stored keys must already be trimmed)
///
/// ## Example
/// ```rust
/// use coupon_core::validation::validate_sku;
///
/// assert!(validate_sku("A1").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// assert!(validate_sku(" A1 ").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    validate_code("sku", sku)
}

/// Validates a coupon code. Same character rules as a SKU.
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    validate_code("coupon code", code)
}

fn validate_code(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 50 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 50,
        });
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity. Must be positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples in the catalog)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a catalog product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_sku(&product.sku)?;
    validate_price_cents(product.price_cents)
}

/// Validates a coupon before it is applied or stored.
///
/// ## Rules
/// ```text
/// code                    valid code
/// amount                  >= 0
/// WholeOrderPercentage    amount <= 10000 bps (100%)
/// ```
///
/// A missing item code is reported by [`crate::Coupon::item_code`] as
/// `CoreError::MissingItemCode`, not here.
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    validate_coupon_code(&coupon.code)?;

    if coupon.amount < 0 {
        return Err(ValidationError::OutOfRange {
            field: "coupon amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if coupon.coupon_type == CouponType::WholeOrderPercentage && coupon.amount > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "coupon rate".to_string(),
            min: 0,
            max: MAX_RATE_BPS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
