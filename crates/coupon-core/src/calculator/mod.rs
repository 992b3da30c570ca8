//! # Coupon Calculators
//!
//! One calculator per [`CouponType`], a selector that maps a type to its
//! calculator, and the two entry points callers use.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Applying a Coupon                                  │
//! │                                                                         │
//! │  coupon code ──► CouponLookup ──► Coupon                                │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │              CalculatorSelector::calculator_for(coupon_type)            │
//! │                                     │                                   │
//! │        ┌──────────────┬─────────────┼──────────────┬──────────────┐     │
//! │        ▼              ▼             ▼              ▼              ▼     │
//! │   WholeOrder     WholeOrder    Specific{Product,  FreeGift     (no      │
//! │   Fixed          Percentage    Supplier,Category}  │          default)  │
//! │        │              │             │              │                    │
//! │        └──────► order.discounts ◄───┘              └──► order_lines     │
//! │                                                                         │
//! │  Caller reads order.amount_payable()                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Discipline
//! Every calculator takes `&mut Order` and appends. Nothing is edited or
//! removed, and a failing calculator appends nothing. Applying the same
//! coupon twice appends twice: callers apply each coupon at most once.

mod free_gift;
mod line_match;
mod whole_order;

pub use free_gift::FreeGiftCalculator;
pub use line_match::{
    LineKey, SpecificCategoryCalculator, SpecificProductCalculator, SpecificSupplierCalculator,
};
pub use whole_order::{WholeOrderFixedCalculator, WholeOrderPercentageCalculator};

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::lookup::{CouponLookup, ProductLookup};
use crate::types::{Coupon, CouponType, Order};
use crate::validation::validate_coupon;

// =============================================================================
// Calculator Trait
// =============================================================================

/// The calculation behavior of one coupon type.
pub trait CouponCalculator {
    /// The coupon type this calculator handles.
    fn coupon_type(&self) -> CouponType;

    /// Appends the coupon's effect to `order`.
    ///
    /// ## Errors
    /// Returns an error and leaves `order` untouched when the coupon cannot
    /// be applied. Finding nothing to discount is not an error.
    fn apply(&self, coupon: &Coupon, order: &mut Order) -> CoreResult<()>;
}

// =============================================================================
// Calculator Selector
// =============================================================================

/// Maps a coupon type to its calculator.
///
/// Holds the product lookup needed by [`FreeGiftCalculator`]. The selector
/// is cheap to build; create one per calculation.
///
/// ## Example
/// ```rust
/// use coupon_core::calculator::CalculatorSelector;
/// use coupon_core::{Catalog, Coupon, CouponType, Money, Order, Product};
///
/// let catalog = Catalog::new();
/// let selector = CalculatorSelector::new(&catalog);
///
/// let mut order = Order::new();
/// order.add_line(Product::new("A1", "Snacks", "Acme", 5000), 1).unwrap();
///
/// let coupon = Coupon::whole_order_fixed("TENOFF", Money::from_cents(1000));
/// selector
///     .calculator_for(CouponType::WholeOrderFixed)
///     .apply(&coupon, &mut order)
///     .unwrap();
///
/// assert_eq!(order.amount_payable().cents(), 4000);
/// ```
#[derive(Clone, Copy)]
pub struct CalculatorSelector<'a> {
    products: &'a dyn ProductLookup,
}

impl<'a> CalculatorSelector<'a> {
    pub fn new(products: &'a dyn ProductLookup) -> Self {
        CalculatorSelector { products }
    }

    /// Returns the calculator for `coupon_type`.
    ///
    /// The match is exhaustive: adding a `CouponType` variant does not
    /// compile until it is mapped here.
    ///
    /// The calculator does not validate the coupon; [`apply_coupon`] does.
    pub fn calculator_for(&self, coupon_type: CouponType) -> Box<dyn CouponCalculator + 'a> {
        debug!(%coupon_type, "Selecting coupon calculator");
        match coupon_type {
            CouponType::WholeOrderFixed => Box::new(WholeOrderFixedCalculator),
            CouponType::WholeOrderPercentage => Box::new(WholeOrderPercentageCalculator),
            CouponType::SpecificProduct => Box::new(SpecificProductCalculator),
            CouponType::SpecificSupplier => Box::new(SpecificSupplierCalculator),
            CouponType::SpecificCategory => Box::new(SpecificCategoryCalculator),
            CouponType::FreeGift => Box::new(FreeGiftCalculator::new(self.products)),
        }
    }

    /// Returns the calculator for a raw coupon type tag.
    ///
    /// ## Errors
    /// `UnsupportedCouponType` if the tag is outside the closed set.
    pub fn calculator_for_tag(&self, tag: &str) -> CoreResult<Box<dyn CouponCalculator + 'a>> {
        let coupon_type = tag.parse::<CouponType>().map_err(|err| {
            warn!(tag = %tag, "Unsupported coupon type");
            err
        })?;
        Ok(self.calculator_for(coupon_type))
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Validates `coupon` and applies it to `order` with the matching calculator.
///
/// ## Errors
/// - Validation error for a malformed coupon
/// - `MissingItemCode` for an item-keyed coupon without a target
/// - `ProductNotFound` when a free gift SKU does not resolve
pub fn apply_coupon(
    products: &dyn ProductLookup,
    coupon: &Coupon,
    order: &mut Order,
) -> CoreResult<()> {
    validate_coupon(coupon)?;
    CalculatorSelector::new(products)
        .calculator_for(coupon.coupon_type)
        .apply(coupon, order)
}

/// Resolves `code` through `lookup` and applies the coupon to `order`.
///
/// ## User Workflow
/// ```text
/// Customer enters "TENOFF"
///      │
///      ▼
/// redeem_coupon ← THIS FUNCTION
///      │
///      ├── unknown code? → CouponNotFound
///      │
///      └── apply_coupon → order updated, coupon returned for the receipt
/// ```
pub fn redeem_coupon<L>(lookup: &L, code: &str, order: &mut Order) -> CoreResult<Coupon>
where
    L: ProductLookup + CouponLookup,
{
    let code = code.trim();
    let coupon = lookup.find_coupon_by_code(code).ok_or_else(|| {
        warn!(code = %code, "Coupon not found");
        CoreError::CouponNotFound(code.to_string())
    })?;

    apply_coupon(lookup, &coupon, order)?;

    info!(
        code = %coupon.code,
        coupon_type = %coupon.coupon_type,
        order_id = %order.id(),
        amount_payable = %order.amount_payable(),
        "Coupon redeemed"
    );
    Ok(coupon)
}

// =============================================================================
// Test Support
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================
