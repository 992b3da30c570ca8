//! Per-line calculators: SpecificProduct, SpecificSupplier, SpecificCategory.
//!
//! All three count the order lines whose product matches the coupon's
//! `item_code` on one key, and discount `amount × matching lines`.
//!
//! ```text
//! Lines: A1 (Acme), A1 (Acme), B2 (Globex)     coupon: SKU A1, $1.00
//!      │
//!      ▼
//! matching lines = 2 ──► Discount "Discount for product A1 x 2" $2.00
//!
//! matching lines = 0 ──► nothing appended, Ok(())
//! ```
//!
//! Lines are counted, not units: a line of quantity 5 counts once. Free
//! gift lines are counted like any other line.

use tracing::debug;

use super::CouponCalculator;
use crate::error::{CoreError, CoreResult};
use crate::types::{Coupon, CouponType, Discount, Order, Product};

/// The product attribute a per-line coupon matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKey {
    Sku,
    Supplier,
    Category,
}

impl LineKey {
    /// Reads this key from `product`.
    pub fn of<'p>(&self, product: &'p Product) -> &'p str {
        match self {
            LineKey::Sku => &product.sku,
            LineKey::Supplier => &product.supplier,
            LineKey::Category => &product.category,
        }
    }

    /// Word used in discount remarks.
    fn label(&self) -> &'static str {
        match self {
            LineKey::Sku => "product",
            LineKey::Supplier => "supplier",
            LineKey::Category => "category",
        }
    }
}

/// Counts matching lines and appends one discount if there is any match.
fn apply_per_matching_line(key: LineKey, coupon: &Coupon, order: &mut Order) -> CoreResult<()> {
    let target = coupon.item_code()?;

    let matching = order
        .order_lines()
        .iter()
        .filter(|line| key.of(line.product()) == target)
        .count() as i64;

    if matching == 0 {
        debug!(code = %coupon.code, target = %target, "No order lines match, coupon adds nothing");
        return Ok(());
    }

    let amount = coupon.fixed_amount().checked_mul(matching).ok_or_else(|| {
        CoreError::AmountOverflow(format!("{} x {} lines", coupon.fixed_amount(), matching))
    })?;
    let remark = format!("Discount for {} {} x {}", key.label(), target, matching);
    order.push_discount(Discount::new(remark, amount))?;

    debug!(
        code = %coupon.code,
        target = %target,
        matching,
        %amount,
        "Per-line discount applied"
    );
    Ok(())
}

/// Flat amount per line carrying the coupon's SKU.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificProductCalculator;

impl CouponCalculator for SpecificProductCalculator {
    fn coupon_type(&self) -> CouponType {
        CouponType::SpecificProduct
    }

    fn apply(&self, coupon: &Coupon, order: &mut Order) -> CoreResult<()> {
        apply_per_matching_line(LineKey::Sku, coupon, order)
    }
}

/// Flat amount per line from the coupon's supplier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificSupplierCalculator;

impl CouponCalculator for SpecificSupplierCalculator {
    fn coupon_type(&self) -> CouponType {
        CouponType::SpecificSupplier
    }

    fn apply(&self, coupon: &Coupon, order: &mut Order) -> CoreResult<()> {
        apply_per_matching_line(LineKey::Supplier, coupon, order)
    }
}

/// Flat amount per line in the coupon's category.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificCategoryCalculator;

impl CouponCalculator for SpecificCategoryCalculator {
    fn coupon_type(&self) -> CouponType {
        CouponType::SpecificCategory
    }

    fn apply(&self, coupon: &Coupon, order: &mut Order) -> CoreResult<()> {
        apply_per_matching_line(LineKey::Category, coupon, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::testing::*;
    use crate::error::CoreError;
    use crate::money::Money;
    use crate::types::OrderLine;

    #[test]
    fn test_specific_product_counts_matching_lines() {
        let mut order = order_with(&[(a1(), 1), (a1(), 1), (a1(), 1)]);
        assert_eq!(order.total().cents(), 1500);
        let coupon = Coupon::specific_product("A1OFF", "A1", Money::from_major_minor(1, 0));

        SpecificProductCalculator.apply(&coupon, &mut order).unwrap();

        assert_eq!(order.discounts().len(), 1);
        assert_eq!(order.discounts()[0].remark(), "Discount for product A1 x 3");
        assert_eq!(order.discounts()[0].amount(), Money::from_major_minor(3, 0));
        assert_eq!(order.amount_payable().cents(), 1200);
    }

    #[test]
    fn test_specific_product_counts_lines_not_units() {
        let mut order = order_with(&[(a1(), 5), (b2(), 1)]);
        let coupon = Coupon::specific_product("A1OFF", "A1", Money::from_cents(100));

        SpecificProductCalculator.apply(&coupon, &mut order).unwrap();

        assert_eq!(order.discounts()[0].amount_cents(), 100);
    }

    #[test]
    fn test_specific_product_without_match_adds_nothing() {
        let mut order = order_with(&[(b2(), 2)]);
        let coupon = Coupon::specific_product("A1OFF", "A1", Money::from_cents(100));

        SpecificProductCalculator.apply(&coupon, &mut order).unwrap();

        assert!(order.discounts().is_empty());
        assert_eq!(order.amount_payable(), order.total());
    }

    #[test]
    fn test_specific_product_counts_free_lines() {
        let mut order = order_with(&[(g1(), 1)]);
        order.push_line(OrderLine::free_gift(g1()));
        let coupon = Coupon::specific_product("G1OFF", "G1", Money::from_cents(200));

        SpecificProductCalculator.apply(&coupon, &mut order).unwrap();

        assert_eq!(order.discounts()[0].amount_cents(), 400);
    }

    #[test]
    fn test_specific_supplier() {
        let mut order = order_with(&[(a1(), 1), (b2(), 3), (a1(), 2)]);
        let coupon = Coupon::specific_supplier("ACME", "Acme", Money::from_cents(150));

        SpecificSupplierCalculator.apply(&coupon, &mut order).unwrap();

        assert_eq!(order.discounts().len(), 1);
        assert_eq!(order.discounts()[0].remark(), "Discount for supplier Acme x 2");
        assert_eq!(order.discounts()[0].amount_cents(), 300);
    }

    #[test]
    fn test_specific_supplier_without_match_adds_nothing() {
        let mut order = order_with(&[(a1(), 1)]);
        let coupon = Coupon::specific_supplier("GLOBEX", "Globex", Money::from_cents(150));

        SpecificSupplierCalculator.apply(&coupon, &mut order).unwrap();

        assert!(order.discounts().is_empty());
    }

    #[test]
    fn test_specific_category() {
        let mut order = order_with(&[(b2(), 1), (a1(), 1), (b2(), 1)]);
        let coupon = Coupon::specific_category("DRINKS", "Drinks", Money::from_cents(250));

        SpecificCategoryCalculator.apply(&coupon, &mut order).unwrap();

        assert_eq!(order.discounts()[0].remark(), "Discount for category Drinks x 2");
        assert_eq!(order.discounts()[0].amount_cents(), 500);
        assert_eq!(order.amount_payable().cents(), 2500 - 500);
    }

    #[test]
    fn test_specific_category_without_match_adds_nothing() {
        let mut order = order_with(&[(a1(), 1)]);
        let coupon = Coupon::specific_category("DRINKS", "Drinks", Money::from_cents(250));

        SpecificCategoryCalculator.apply(&coupon, &mut order).unwrap();

        assert!(order.discounts().is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let mut order = order_with(&[(a1(), 1)]);
        let coupon = Coupon::specific_supplier("ACME", "acme", Money::from_cents(150));

        SpecificSupplierCalculator.apply(&coupon, &mut order).unwrap();

        assert!(order.discounts().is_empty());
    }

    #[test]
    fn test_missing_item_code_fails() {
        let mut order = order_with(&[(a1(), 1)]);
        let mut coupon = Coupon::specific_product("A1OFF", "A1", Money::from_cents(100));
        coupon.item_code = None;

        let err = SpecificProductCalculator.apply(&coupon, &mut order).unwrap_err();

        assert_eq!(
            err,
            CoreError::MissingItemCode {
                code: "A1OFF".to_string(),
                coupon_type: CouponType::SpecificProduct,
            }
        );
        assert!(order.discounts().is_empty());
    }

    #[test]
    fn test_per_line_discount_overflow_fails() {
        let mut order = order_with(&[(a1(), 1), (a1(), 1)]);
        let coupon = Coupon::specific_product("A1OFF", "A1", Money::from_cents(i64::MAX / 2 + 1));

        let err = SpecificProductCalculator.apply(&coupon, &mut order).unwrap_err();

        assert!(matches!(err, CoreError::AmountOverflow(_)));
        assert!(order.discounts().is_empty());
    }

    #[test]
    fn test_line_key_reads_product() {
        let product = a1();
        assert_eq!(LineKey::Sku.of(&product), "A1");
        assert_eq!(LineKey::Supplier.of(&product), "Acme");
        assert_eq!(LineKey::Category.of(&product), "Snacks");
    }
}
