//! # Order Summary
//!
//! What the CLI prints after a coupon is redeemed.
//!
//! ## Text Layout
//! ```text
//! Order 0b6c...  coupon A1OFF (specific_product)
//!   A1          x3      $15.00
//!   G1          x1        FREE
//! Discounts:
//!   Discount for product A1 x 1        -$1.00
//! Total:                $15.00
//! Amount payable:       $14.00
//! ```

use std::fmt;

use coupon_core::{Coupon, CouponType, Money, Order};
use serde::Serialize;

use crate::error::CliResult;

#[derive(Debug, Clone, Serialize)]
pub struct LineSummary {
    pub sku: String,
    pub quantity: i64,
    pub is_free: bool,
    pub subtotal: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscountSummary {
    pub remark: String,
    pub amount: Money,
}

/// Snapshot of an order after a coupon was applied. Amounts are in cents.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub coupon_code: String,
    pub coupon_type: CouponType,
    pub lines: Vec<LineSummary>,
    pub discounts: Vec<DiscountSummary>,
    pub total: Money,
    pub total_discount: Money,
    pub amount_payable: Money,
}

impl OrderSummary {
    pub fn new(order: &Order, coupon: &Coupon) -> Self {
        OrderSummary {
            order_id: order.id().to_string(),
            coupon_code: coupon.code.clone(),
            coupon_type: coupon.coupon_type,
            lines: order
                .order_lines()
                .iter()
                .map(|line| LineSummary {
                    sku: line.product().sku.clone(),
                    quantity: line.quantity(),
                    is_free: line.is_free(),
                    subtotal: line.subtotal(),
                })
                .collect(),
            discounts: order
                .discounts()
                .iter()
                .map(|discount| DiscountSummary {
                    remark: discount.remark().to_string(),
                    amount: discount.amount(),
                })
                .collect(),
            total: order.total(),
            total_discount: order.total_discount(),
            amount_payable: order.amount_payable(),
        }
    }

    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

}

/// The text receipt.
impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Order {}  coupon {} ({})",
            self.order_id, self.coupon_code, self.coupon_type
        )?;

        for line in &self.lines {
            let price = if line.is_free {
                "FREE".to_string()
            } else {
                line.subtotal.to_string()
            };
            writeln!(f, "  {:<10} x{:<5} {:>10}", line.sku, line.quantity, price)?;
        }

        if !self.discounts.is_empty() {
            writeln!(f, "Discounts:")?;
            for discount in &self.discounts {
                writeln!(f, "  {:<32} -{}", discount.remark, discount.amount)?;
            }
        }

        writeln!(f, "Total:           {:>10}", self.total.to_string())?;
        write!(f, "Amount payable:  {:>10}", self.amount_payable.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_core::{apply_coupon, Catalog, Product};

    fn redeemed() -> (Order, Coupon) {
        let catalog = Catalog::new()
            .with_product(Product::new("G1", "Gifts", "Initech", 1500))
            .unwrap();
        let mut order = Order::new();
        order.add_line(Product::new("A1", "Snacks", "Acme", 500), 3).unwrap();

        apply_coupon(&catalog, &Coupon::free_gift("GIFT", "G1"), &mut order).unwrap();
        let coupon = Coupon::specific_product("A1OFF", "A1", Money::from_cents(100));
        apply_coupon(&catalog, &coupon, &mut order).unwrap();
        (order, coupon)
    }

    #[test]
    fn test_summary_values() {
        let (order, coupon) = redeemed();
        let summary = OrderSummary::new(&order, &coupon);

        assert_eq!(summary.lines.len(), 2);
        assert!(summary.lines[1].is_free);
        assert!(summary.lines[1].subtotal.is_zero());
        assert_eq!(summary.discounts.len(), 1);
        assert_eq!(summary.total.cents(), 1500);
        assert_eq!(summary.amount_payable.cents(), 1400);
    }

    #[test]
    fn test_text_report() {
        let (order, coupon) = redeemed();
        let text = OrderSummary::new(&order, &coupon).to_string();

        assert!(text.contains("coupon A1OFF (specific_product)"));
        assert!(text.contains("FREE"));
        assert!(text.contains("Discount for product A1 x 1"));
        assert!(text.ends_with("$14.00"));
    }

    #[test]
    fn test_json_report() {
        let (order, coupon) = redeemed();
        let json = OrderSummary::new(&order, &coupon).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["amount_payable"], 1400);
        assert_eq!(value["coupon_type"], "specific_product");
        assert_eq!(value["lines"][1]["is_free"], true);
    }
}
