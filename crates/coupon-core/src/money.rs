//! # Money Module
//!
//! Provides the `Money` type for order totals and discount amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 10% coupon on $200.00 must be exactly $20.00, and the payable       │
//! │  amount exactly $180.00, no matter how many coupons are stacked.       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                            │
//! │    20000 cents × 1000 bps / 10000 = 2000 cents                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::money::Money;
//!
//! let price = Money::from_cents(500);          // $5.00
//! let line = price.checked_mul(3);             // $15.00
//! assert_eq!(line, Some(Money::from_cents(1500)));
//!
//! // Overflow is reported, never wrapped
//! assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
//! ```
//!
//! ## Overflow
//! Anything that scales or accumulates amounts goes through the `checked_*`
//! methods. `Order` checks every line and discount on the way in, so its
//! totals can use plain `+`, `-` and `Sum` afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: `amount_payable` may go negative when discounts
///   exceed the order total, and that value must be representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► OrderLine.subtotal ──► Order.total
///                                                     │
/// Coupon.amount ──► Discount.amount ──────────────────┤
///                                                     ▼
///                                             Order.amount_payable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a quantity or a count of matching lines.
    ///
    /// Returns `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.checked_mul(3).map(|m| m.cents()), Some(897));
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts. Returns `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts `other`. Returns `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `rate` percent of this amount, rounded half up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides the
    /// rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    /// use coupon_core::types::DiscountRate;
    ///
    /// let total = Money::from_cents(20000);  // $200.00
    /// let rate = DiscountRate::from_bps(1000); // 10%
    /// assert_eq!(total.percentage_of(rate), Some(Money::from_cents(2000))); // $20.00
    ///
    /// // $10.00 × 8.25% = $0.825 → $0.83
    /// let odd = Money::from_cents(1000).percentage_of(DiscountRate::from_bps(825));
    /// assert_eq!(odd, Some(Money::from_cents(83)));
    /// ```
    ///
    /// Returns `None` when the result does not fit in i64, which needs a
    /// rate above 100%.
    pub fn percentage_of(&self, rate: DiscountRate) -> Option<Money> {
        // i128 keeps large totals from overflowing the intermediate product
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        i64::try_from(cents).ok().map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// Used for log lines and the CLI text report. No currency handling.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Summing an iterator of Money (line subtotals, discount amounts).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
