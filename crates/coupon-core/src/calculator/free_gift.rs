//! Free gift calculator: adds one zero-price line instead of a discount.

use tracing::{debug, warn};

use super::CouponCalculator;
use crate::error::{CoreError, CoreResult};
use crate::lookup::ProductLookup;
use crate::types::{Coupon, CouponType, Order, OrderLine};

/// Resolves the coupon's SKU and appends it as a free line.
///
/// ## User Workflow
/// ```text
/// coupon { free_gift, item_code: "G1" }
///      │
///      ▼
/// ProductLookup::find_product_by_sku("G1")
///      │
///      ├── None ──► ProductNotFound("G1"), order untouched
///      │
///      └── Some ──► OrderLine { G1, quantity 1, is_free } appended
/// ```
///
/// No `Discount` is recorded. The saving is the free line's zero subtotal.
pub struct FreeGiftCalculator<'a> {
    products: &'a dyn ProductLookup,
}

impl<'a> FreeGiftCalculator<'a> {
    pub fn new(products: &'a dyn ProductLookup) -> Self {
        FreeGiftCalculator { products }
    }
}

impl CouponCalculator for FreeGiftCalculator<'_> {
    fn coupon_type(&self) -> CouponType {
        CouponType::FreeGift
    }

    fn apply(&self, coupon: &Coupon, order: &mut Order) -> CoreResult<()> {
        let sku = coupon.item_code()?;

        let product = self.products.find_product_by_sku(sku).ok_or_else(|| {
            warn!(code = %coupon.code, sku = %sku, "Free gift product not found");
            CoreError::ProductNotFound(sku.to_string())
        })?;

        order.push_line(OrderLine::free_gift(product));

        debug!(code = %coupon.code, sku = %sku, "Free gift line added");
        Ok(())
    }
}
