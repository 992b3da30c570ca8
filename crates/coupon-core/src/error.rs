//! # Error Types
//!
//! Domain-specific error types for coupon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  coupon-core errors (this file)                                        │
//! │  ├── CoreError        - Calculation failures                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  coupon-cli errors (separate crate)                                    │
//! │  └── CliError         - Config, file and parse failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not An Error
//! A product/supplier/category coupon that matches zero order lines is a
//! valid outcome: nothing is appended and `Ok(())` is returned. Only data
//! integrity problems (unknown SKU, unknown coupon, malformed coupon) fail.

use thiserror::Error;

use crate::types::CouponType;

// =============================================================================
// Core Error
// =============================================================================

/// Coupon calculation errors.
///
/// Every variant is fatal to the calculation it came from. The order is left
/// exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A coupon type tag is outside the closed [`CouponType`] set.
    ///
    /// ## When This Occurs
    /// - A catalog or request carries a tag the engine does not know
    /// - A new coupon type was added upstream but the engine was not updated
    #[error("Unsupported coupon type: {0}")]
    UnsupportedCouponType(String),

    /// A SKU cannot be resolved by the product lookup.
    ///
    /// ## When This Occurs
    /// - Free gift coupon points at a SKU that is not in the catalog
    /// - Caller builds an order line for an unknown SKU
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A coupon code cannot be resolved by the coupon lookup.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// An item-keyed coupon carries no item code.
    ///
    /// ## When This Occurs
    /// - SpecificProduct / SpecificSupplier / SpecificCategory / FreeGift
    ///   coupon saved without its target
    #[error("Coupon {code} ({coupon_type}) has no item code")]
    MissingItemCode {
        code: String,
        coupon_type: CouponType,
    },

    /// An amount does not fit in i64 cents.
    ///
    /// ## When This Occurs
    /// - A line's price × quantity, or the order total, is too large
    /// - A per-line discount or the sum of discounts is too large
    ///
    /// The order is left unchanged.
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any calculation runs, so a validation failure never leaves
/// a half-applied coupon behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., whitespace inside a SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("G1".to_string());
        assert_eq!(err.to_string(), "Product not found: G1");

        let err = CoreError::UnsupportedCouponType("buy_one_get_one".to_string());
        assert_eq!(err.to_string(), "Unsupported coupon type: buy_one_get_one");

        let err = CoreError::MissingItemCode {
            code: "GIFT".to_string(),
            coupon_type: CouponType::FreeGift,
        };
        assert_eq!(err.to_string(), "Coupon GIFT (free_gift) has no item code");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
