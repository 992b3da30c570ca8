//! # Domain Types
//!
//! Core domain types used by the coupon engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │   OrderLine     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  product        │──►│  sku (identity) │       │
//! │  │  order_lines    │   │  quantity       │   │  category       │       │
//! │  │  discounts      │   │  is_free        │   │  supplier       │       │
//! │  └────────┬────────┘   └─────────────────┘   │  price_cents    │       │
//! │           │                                  └─────────────────┘       │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Discount     │   │     Coupon      │   │   CouponType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  remark         │   │  code           │──►│  (closed set    │       │
//! │  │  amount_cents   │   │  item_code      │   │   of 6 kinds)   │       │
//! │  └─────────────────┘   │  amount         │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! An `Order` owns its lines and discounts. Each line owns a copy of its
//! product, so later catalog changes never alter an order being priced.
//! Discounts and free lines are appended only by the calculators in
//! [`crate::calculator`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_product, validate_quantity, MAX_RATE_BPS};

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10%, the fraction 0.10 written as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Renders the rate as a percentage without trailing zeros: `10%`, `12.5%`,
/// `8.25%`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Category name, matched by SpecificCategory coupons.
    pub category: String,

    /// Supplier name, matched by SpecificSupplier coupons.
    pub supplier: String,

    /// Unit price in cents (never negative).
    pub price_cents: i64,
}

impl Product {
    /// Creates a new product.
    pub fn new(
        sku: impl Into<String>,
        category: impl Into<String>,
        supplier: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        Product {
            sku: sku.into(),
            category: category.into(),
            supplier: supplier.into(),
            price_cents,
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Coupon Type
// =============================================================================

/// The closed set of coupon kinds the engine knows how to calculate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    /// Flat amount off the whole order.
    WholeOrderFixed,
    /// Percentage of the order total.
    WholeOrderPercentage,
    /// Flat amount per line carrying a given SKU.
    SpecificProduct,
    /// Flat amount per line from a given supplier.
    SpecificSupplier,
    /// Flat amount per line in a given category.
    SpecificCategory,
    /// Adds one free line for a given SKU.
    FreeGift,
}

impl CouponType {
    /// Every coupon type, in declaration order.
    pub const ALL: [CouponType; 6] = [
        CouponType::WholeOrderFixed,
        CouponType::WholeOrderPercentage,
        CouponType::SpecificProduct,
        CouponType::SpecificSupplier,
        CouponType::SpecificCategory,
        CouponType::FreeGift,
    ];

    /// Returns true if the coupon needs `item_code` to know what it targets.
    pub fn is_item_keyed(&self) -> bool {
        !matches!(
            self,
            CouponType::WholeOrderFixed | CouponType::WholeOrderPercentage
        )
    }

    /// The snake_case tag used in catalogs and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponType::WholeOrderFixed => "whole_order_fixed",
            CouponType::WholeOrderPercentage => "whole_order_percentage",
            CouponType::SpecificProduct => "specific_product",
            CouponType::SpecificSupplier => "specific_supplier",
            CouponType::SpecificCategory => "specific_category",
            CouponType::FreeGift => "free_gift",
        }
    }
}

impl fmt::Display for CouponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `free_gift`, `free-gift` and `FreeGift` spellings.
impl FromStr for CouponType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "wholeorderfixed" => Ok(CouponType::WholeOrderFixed),
            "wholeorderpercentage" => Ok(CouponType::WholeOrderPercentage),
            "specificproduct" => Ok(CouponType::SpecificProduct),
            "specificsupplier" => Ok(CouponType::SpecificSupplier),
            "specificcategory" => Ok(CouponType::SpecificCategory),
            "freegift" => Ok(CouponType::FreeGift),
            _ => Err(CoreError::UnsupportedCouponType(s.to_string())),
        }
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A typed promotional rule.
///
/// ## Amount Semantics
/// | Type                   | `item_code`        | `amount`                |
/// |------------------------|--------------------|-------------------------|
/// | WholeOrderFixed        | unused             | cents off the order     |
/// | WholeOrderPercentage   | unused             | basis points (1000=10%) |
/// | SpecificProduct        | SKU                | cents per matching line |
/// | SpecificSupplier       | supplier name      | cents per matching line |
/// | SpecificCategory       | category name      | cents per matching line |
/// | FreeGift               | SKU of the gift    | unused                  |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coupon {
    /// Unique coupon code entered by the customer.
    pub code: String,

    pub coupon_type: CouponType,

    /// Target of item-keyed coupons.
    #[serde(default)]
    pub item_code: Option<String>,

    /// Cents or basis points, depending on `coupon_type`.
    #[serde(default)]
    pub amount: i64,
}

impl Coupon {
    /// Flat amount off the whole order.
    pub fn whole_order_fixed(code: impl Into<String>, amount: Money) -> Self {
        Self::build(code, CouponType::WholeOrderFixed, None, amount.cents())
    }

    /// Percentage of the whole order.
    pub fn whole_order_percentage(code: impl Into<String>, rate: DiscountRate) -> Self {
        Self::build(code, CouponType::WholeOrderPercentage, None, rate.bps() as i64)
    }

    /// Flat amount per line with the given SKU.
    pub fn specific_product(code: impl Into<String>, sku: impl Into<String>, amount: Money) -> Self {
        Self::build(code, CouponType::SpecificProduct, Some(sku.into()), amount.cents())
    }

    /// Flat amount per line from the given supplier.
    pub fn specific_supplier(
        code: impl Into<String>,
        supplier: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self::build(code, CouponType::SpecificSupplier, Some(supplier.into()), amount.cents())
    }

    /// Flat amount per line in the given category.
    pub fn specific_category(
        code: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self::build(code, CouponType::SpecificCategory, Some(category.into()), amount.cents())
    }

    /// One free unit of the given SKU.
    pub fn free_gift(code: impl Into<String>, sku: impl Into<String>) -> Self {
        Self::build(code, CouponType::FreeGift, Some(sku.into()), 0)
    }

    fn build(
        code: impl Into<String>,
        coupon_type: CouponType,
        item_code: Option<String>,
        amount: i64,
    ) -> Self {
        Coupon {
            code: code.into(),
            coupon_type,
            item_code,
            amount,
        }
    }

    /// The amount read as money (fixed and per-line coupons).
    #[inline]
    pub fn fixed_amount(&self) -> Money {
        Money::from_cents(self.amount)
    }

    /// The amount read as a rate (percentage coupons), capped at 100%.
    ///
    /// Negative amounts read as zero and amounts above [`MAX_RATE_BPS`] read
    /// as 100%. [`crate::validation::validate_coupon`] rejects both before
    /// [`crate::apply_coupon`] calculates anything.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.amount.clamp(0, MAX_RATE_BPS) as u32)
    }

    /// Returns the item code of an item-keyed coupon.
    ///
    /// ## Errors
    /// `MissingItemCode` if the code is absent or blank.
    pub fn item_code(&self) -> CoreResult<&str> {
        match self.item_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Ok(code),
            _ => Err(CoreError::MissingItemCode {
                code: self.code.clone(),
                coupon_type: self.coupon_type,
            }),
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line on an order: one product, a quantity, and whether it is free.
///
/// Lines are built through [`OrderLine::new`] or [`OrderLine::free_gift`],
/// so a paid line's subtotal always fits in i64 cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrderLine {
    product: Product,
    quantity: i64,
    is_free: bool,
}

impl OrderLine {
    /// Creates a paid line.
    ///
    /// ## Errors
    /// - Validation error for an invalid product or a non-positive quantity
    /// - `AmountOverflow` if price × quantity does not fit in cents
    pub fn new(product: Product, quantity: i64) -> CoreResult<Self> {
        validate_product(&product)?;
        validate_quantity(quantity)?;

        if product.price().checked_mul(quantity).is_none() {
            return Err(CoreError::AmountOverflow(format!(
                "line {} x {}",
                product.sku, quantity
            )));
        }

        Ok(OrderLine {
            product,
            quantity,
            is_free: false,
        })
    }

    /// Creates a free gift line: quantity 1, zero subtotal.
    pub fn free_gift(product: Product) -> Self {
        OrderLine {
            product,
            quantity: 1,
            is_free: true,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn is_free(&self) -> bool {
        self.is_free
    }

    /// Line subtotal: zero when free, otherwise price × quantity.
    pub fn subtotal(&self) -> Money {
        if self.is_free {
            Money::zero()
        } else {
            // Checked in `new`
            Money::from_cents(self.product.price_cents * self.quantity)
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// An immutable record of a reduction applied to an order.
///
/// Only the calculators create discounts; callers read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Discount {
    remark: String,
    amount_cents: i64,
}

impl Discount {
    pub(crate) fn new(remark: impl Into<String>, amount: Money) -> Self {
        Discount {
            remark: remark.into(),
            amount_cents: amount.cents(),
        }
    }

    /// Human-readable description shown on receipts.
    pub fn remark(&self) -> &str {
        &self.remark
    }

    /// Amount in cents.
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order being priced.
///
/// ## Derived Values
/// ```text
/// total          = Σ line.subtotal()        (free lines add 0)
/// amount_payable = total − Σ discount.amount (NOT clamped at zero)
/// ```
///
/// Every append checks that these three values still fit in i64 cents and
/// fails with `AmountOverflow` otherwise, leaving the order unchanged.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct Order {
    id: String,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    order_lines: Vec<OrderLine>,
    discounts: Vec<Discount>,
}

impl Order {
    /// Creates an empty order with a fresh UUID.
    pub fn new() -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            order_lines: Vec::new(),
            discounts: Vec::new(),
        }
    }

    /// Adds a paid line for `product`.
    ///
    /// ## Errors
    /// - Validation error for an invalid product or a non-positive quantity
    /// - `AmountOverflow` if the line or the new total does not fit in cents
    ///
    /// The order is unchanged on error.
    pub fn add_line(&mut self, product: Product, quantity: i64) -> CoreResult<()> {
        let line = OrderLine::new(product, quantity)?;
        let total = self.total().checked_add(line.subtotal());
        ensure_payable(total, Some(self.total_discount()), || {
            format!("order total with line {}", line.product.sku)
        })?;

        self.order_lines.push(line);
        Ok(())
    }

    pub(crate) fn push_discount(&mut self, discount: Discount) -> CoreResult<()> {
        let total_discount = self.total_discount().checked_add(discount.amount());
        ensure_payable(Some(self.total()), total_discount, || {
            format!("total discount with \"{}\"", discount.remark)
        })?;

        self.discounts.push(discount);
        Ok(())
    }

    /// Appends a free line. Free lines add nothing to the total.
    pub(crate) fn push_line(&mut self, line: OrderLine) {
        debug_assert!(line.is_free);
        self.order_lines.push(line);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Lines in insertion order.
    pub fn order_lines(&self) -> &[OrderLine] {
        &self.order_lines
    }

    /// Discounts in the order they were applied.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> Money {
        self.order_lines.iter().map(OrderLine::subtotal).sum()
    }

    /// Sum of all discount amounts.
    pub fn total_discount(&self) -> Money {
        self.discounts.iter().map(Discount::amount).sum()
    }

    /// What the customer pays. May be negative when discounts exceed the total.
    pub fn amount_payable(&self) -> Money {
        self.total() - self.total_discount()
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::new()
    }
}

/// Fails unless both sums exist and `total - total_discount` fits in cents.
fn ensure_payable<F>(total: Option<Money>, total_discount: Option<Money>, what: F) -> CoreResult<()>
where
    F: FnOnce() -> String,
{
    match (total, total_discount) {
        (Some(total), Some(discount)) if total.checked_sub(discount).is_some() => Ok(()),
        _ => Err(CoreError::AmountOverflow(what())),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, price_cents: i64) -> Product {
        Product::new(sku, "Snacks", "Acme", price_cents)
    }

    #[test]
    fn test_discount_rate_display() {
        assert_eq!(DiscountRate::from_bps(1000).to_string(), "10%");
        assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.5%");
        assert_eq!(DiscountRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(DiscountRate::from_bps(5).to_string(), "0.05%");
        assert_eq!(DiscountRate::default().to_string(), "0%");
    }

    #[test]
    fn test_line_subtotal() {
        let line = OrderLine::new(product("A1", 250), 4).unwrap();
        assert_eq!(line.subtotal().cents(), 1000);

        let gift = OrderLine::free_gift(product("G1", 999));
        assert_eq!(gift.quantity(), 1);
        assert!(gift.is_free());
        assert!(gift.subtotal().is_zero());
    }

    #[test]
    fn test_add_line_rejects_non_positive_quantity() {
        let mut order = Order::new();
        assert!(order.add_line(product("A1", 100), 0).is_err());
        assert!(order.add_line(product("A1", 100), -2).is_err());
        assert!(order.order_lines().is_empty());
    }

    #[test]
    fn test_total_ignores_free_lines() {
        let mut order = Order::new();
        order.add_line(product("A1", 500), 2).unwrap();
        order.add_line(product("B2", 150), 1).unwrap();
        order.push_line(OrderLine::free_gift(product("G1", 10_000)));

        assert_eq!(order.total().cents(), 1150);
        assert_eq!(order.amount_payable().cents(), 1150);
    }

    #[test]
    fn test_amount_payable_is_not_clamped() {
        let mut order = Order::new();
        order.add_line(product("A1", 500), 1).unwrap();
        order.push_discount(Discount::new("big", Money::from_cents(800))).unwrap();

        assert_eq!(order.total_discount().cents(), 800);
        assert_eq!(order.amount_payable().cents(), -300);
    }

    #[test]
    fn test_add_line_rejects_invalid_product() {
        let mut order = Order::new();
        assert!(order.add_line(product("A1", -1), 1).is_err());
        assert!(order.add_line(product(" A1 ", 100), 1).is_err());
        assert!(order.order_lines().is_empty());
    }

    #[test]
    fn test_add_line_rejects_overflowing_line() {
        let mut order = Order::new();
        let err = order
            .add_line(product("BIG", 1_000_000_000_000_000), 10_000)
            .unwrap_err();

        assert!(matches!(err, CoreError::AmountOverflow(_)));
        assert!(order.order_lines().is_empty());
        assert!(order.total().is_zero());
    }

    #[test]
    fn test_add_line_rejects_overflowing_total() {
        let mut order = Order::new();
        order.add_line(product("BIG", i64::MAX / 2), 2).unwrap();

        let err = order.add_line(product("A1", 500), 1).unwrap_err();

        assert!(matches!(err, CoreError::AmountOverflow(_)));
        assert_eq!(order.order_lines().len(), 1);
        assert_eq!(order.total().cents(), (i64::MAX / 2) * 2);
    }

    #[test]
    fn test_push_discount_rejects_overflow() {
        let mut order = Order::new();
        order.add_line(product("A1", 500), 1).unwrap();
        order
            .push_discount(Discount::new("most", Money::from_cents(i64::MAX - 10)))
            .unwrap();

        let err = order
            .push_discount(Discount::new("more", Money::from_cents(i64::MAX)))
            .unwrap_err();

        assert!(matches!(err, CoreError::AmountOverflow(_)));
        assert_eq!(order.discounts().len(), 1);
        assert_eq!(order.amount_payable().cents(), 500 - (i64::MAX - 10));
    }

    #[test]
    fn test_orders_get_distinct_ids() {
        let a = Order::new();
        let b = Order::default();
        assert_ne!(a.id(), b.id());
        assert!(uuid::Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_coupon_type_parse() {
        assert_eq!("free_gift".parse::<CouponType>().unwrap(), CouponType::FreeGift);
        assert_eq!(
            "WholeOrderPercentage".parse::<CouponType>().unwrap(),
            CouponType::WholeOrderPercentage
        );
        assert_eq!(
            "specific-supplier".parse::<CouponType>().unwrap(),
            CouponType::SpecificSupplier
        );

        let err = "buy_one_get_one".parse::<CouponType>().unwrap_err();
        assert_eq!(err, CoreError::UnsupportedCouponType("buy_one_get_one".to_string()));
    }

    #[test]
    fn test_coupon_type_display_round_trips() {
        for coupon_type in CouponType::ALL {
            assert_eq!(coupon_type.to_string().parse::<CouponType>().unwrap(), coupon_type);
        }
    }

    #[test]
    fn test_coupon_type_serde_tag() {
        let json = serde_json::to_string(&CouponType::SpecificCategory).unwrap();
        assert_eq!(json, "\"specific_category\"");
    }

    #[test]
    fn test_coupon_item_code() {
        let coupon = Coupon::specific_product("A1OFF", " A1 ", Money::from_cents(100));
        assert_eq!(coupon.item_code().unwrap(), "A1");

        let mut blank = Coupon::free_gift("GIFT", "");
        assert!(matches!(blank.item_code(), Err(CoreError::MissingItemCode { .. })));

        blank.item_code = None;
        assert!(matches!(blank.item_code(), Err(CoreError::MissingItemCode { .. })));
    }

    #[test]
    fn test_coupon_deserializes_without_optional_fields() {
        let coupon: Coupon =
            serde_json::from_str(r#"{"code":"TENOFF","coupon_type":"whole_order_fixed","amount":1000}"#)
                .unwrap();
        assert_eq!(coupon.item_code, None);
        assert_eq!(coupon.fixed_amount().cents(), 1000);
    }

    #[test]
    fn test_coupon_rate() {
        let coupon = Coupon::whole_order_percentage("TEN", DiscountRate::from_bps(1000));
        assert_eq!(coupon.rate().bps(), 1000);

        let negative = Coupon {
            amount: -5,
            ..coupon.clone()
        };
        assert!(negative.rate().is_zero());

        let above_full = Coupon {
            amount: 25_000,
            ..coupon
        };
        assert_eq!(above_full.rate().bps(), 10_000);
    }
}
