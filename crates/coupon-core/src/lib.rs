//! # coupon-core: Pure Coupon Calculation Logic
//!
//! This crate is the **heart** of the coupon engine. Given an order and a
//! coupon, it appends the right discount to the order, or a free line.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coupon Engine Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (coupon-cli, a web handler, ...)          │   │
//! │  │    build Order ──► look up Coupon ──► apply ──► read payable    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ coupon-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ calculator │  │  lookup   │  │   │
//! │  │   │  Order    │  │   Money   │  │ Selector   │  │  traits   │  │   │
//! │  │   │  Coupon   │  │   Rate    │  │ 6 kinds    │  │  Catalog  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO GLOBAL STATE           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Coupon, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`calculator`] - One calculator per coupon type, and the selector
//! - [`lookup`] - Product/coupon lookup traits and the in-memory catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use coupon_core::{redeem_coupon, Catalog, Coupon, DiscountRate, Order, Product};
//!
//! let catalog = Catalog::new()
//!     .with_product(Product::new("B2", "Drinks", "Globex", 1000))?
//!     .with_coupon(Coupon::whole_order_percentage("TEN", DiscountRate::from_bps(1000)))?;
//!
//! let mut order = Order::new();
//! order.add_line(Product::new("B2", "Drinks", "Globex", 1000), 20)?;
//!
//! redeem_coupon(&catalog, "TEN", &mut order)?;
//!
//! assert_eq!(order.total().cents(), 20000);
//! assert_eq!(order.amount_payable().cents(), 18000);
//! # Ok::<(), coupon_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod lookup;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{apply_coupon, redeem_coupon, CalculatorSelector, CouponCalculator};
pub use error::{CoreError, CoreResult, ValidationError};
pub use lookup::{Catalog, CatalogData, CouponLookup, ProductLookup};
pub use money::Money;
pub use types::*;
