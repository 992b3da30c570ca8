//! Whole-order calculators: a flat amount, or a percentage of the total.

use tracing::{debug, warn};

use super::CouponCalculator;
use crate::error::{CoreError, CoreResult};
use crate::types::{Coupon, CouponType, Discount, Order};

/// Flat amount off the whole order. No precondition.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeOrderFixedCalculator;

impl CouponCalculator for WholeOrderFixedCalculator {
    fn coupon_type(&self) -> CouponType {
        CouponType::WholeOrderFixed
    }

    fn apply(&self, coupon: &Coupon, order: &mut Order) -> CoreResult<()> {
        let amount = coupon.fixed_amount();
        order.push_discount(Discount::new("Discount for whole order", amount))?;

        debug!(code = %coupon.code, %amount, "Whole order fixed discount applied");
        Ok(())
    }
}

/// Percentage of the order total at the time of application.
///
/// ## Example
/// ```text
/// total $200.00, coupon 1000 bps
///      │
///      ▼
/// Discount "Discount for whole order (10%)" $20.00
/// ```
///
/// The total ignores discounts already on the order, so a percentage
/// coupon applied after a fixed one is still taken from the full total.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeOrderPercentageCalculator;

impl CouponCalculator for WholeOrderPercentageCalculator {
    fn coupon_type(&self) -> CouponType {
        CouponType::WholeOrderPercentage
    }

    fn apply(&self, coupon: &Coupon, order: &mut Order) -> CoreResult<()> {
        let rate = coupon.rate();
        if i64::from(rate.bps()) != coupon.amount {
            warn!(
                code = %coupon.code,
                amount = coupon.amount,
                %rate,
                "Coupon rate out of range, capped"
            );
        }

        let total = order.total();
        let amount = total.percentage_of(rate).ok_or_else(|| {
            CoreError::AmountOverflow(format!("{} of {}", rate, total))
        })?;
        order.push_discount(Discount::new(
            format!("Discount for whole order ({})", rate),
            amount,
        ))?;

        debug!(code = %coupon.code, %rate, %amount, "Whole order percentage discount applied");
        Ok(())
    }
}
