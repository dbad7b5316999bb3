//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    6500 × 1.15 = 7474.999999999999  ❌ one peso short                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer pesos and basis points                           │
//! │    6500 × 11500 / 10000 = 7475      ✅ exact                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices in the salon are whole pesos, so `Money` counts whole currency
//! units. Percentages are `Rate`s in basis points (1500 = 15%).
//!
//! ## Usage
//! ```rust
//! use kala_core::money::{Money, Rate};
//!
//! let price = Money::new(52_500);
//! assert_eq!(price.to_string(), "$52.500");
//!
//! let surcharge = Rate::from_bps(11_500); // 115%
//! assert_eq!(surcharge.apply_ceil(Money::new(1001)).unwrap().amount(), 1152);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units (ARS pesos).
///
/// ## Design Decisions
/// - **i64 (signed)**: product stock corrections and differences can go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use kala_core::money::Money;
    ///
    /// let unit_price = Money::new(8_500);
    /// assert_eq!(unit_price.multiply_quantity(3).unwrap().amount(), 25_500);
    /// assert!(Money::new(i64::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 4000 bps = 40% (commission), 11500 bps = 115% (cash + 15% surcharge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies the rate and rounds up to the next whole unit.
    ///
    /// `ceil(amount × bps / 10000)`, computed exactly. `None` when the
    /// result does not fit in an `i64`.
    pub fn apply_ceil(&self, amount: Money) -> Option<Money> {
        let product = amount.0 as i128 * self.0 as i128;
        let floor = product.div_euclid(BPS_SCALE);
        let rounded = if product.rem_euclid(BPS_SCALE) == 0 {
            floor
        } else {
            floor + 1
        };
        i64::try_from(rounded).ok().map(Money)
    }

    /// Applies the rate and rounds to the nearest whole unit, ties to even.
    ///
    /// ## Bankers Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF TO EVEN                                                 │
    /// │                                                                     │
    /// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4                              │
    /// │    anything not exactly .5 rounds to the nearest unit              │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// `None` when the result does not fit in an `i64`.
    pub fn apply_half_even(&self, amount: Money) -> Option<Money> {
        let product = amount.0 as i128 * self.0 as i128;
        let floor = product.div_euclid(BPS_SCALE);
        let twice_rem = product.rem_euclid(BPS_SCALE) * 2;

        let rounded = if twice_rem > BPS_SCALE {
            floor + 1
        } else if twice_rem == BPS_SCALE && floor % 2 != 0 {
            floor + 1
        } else {
            floor
        };
        i64::try_from(rounded).ok().map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `$X.XXX` with `.` as the thousands separator.
///
/// Negative values keep the sign after the currency symbol: `$-1.000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "${}{}", sign, grouped)
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_thousands_separator() {
        assert_eq!(Money::new(0).to_string(), "$0");
        assert_eq!(Money::new(999).to_string(), "$999");
        assert_eq!(Money::new(1000).to_string(), "$1.000");
        assert_eq!(Money::new(52_500).to_string(), "$52.500");
        assert_eq!(Money::new(1_234_567).to_string(), "$1.234.567");
        assert_eq!(Money::new(-1000).to_string(), "$-1.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);

        assert_eq!((a + b).amount(), 1500);
        assert_eq!((a - b).amount(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.amount(), 2000);
    }

    #[test]
    fn test_apply_ceil() {
        let rate = Rate::from_bps(11_500);
        assert_eq!(rate.apply_ceil(Money::new(1000)).unwrap().amount(), 1150);
        assert_eq!(rate.apply_ceil(Money::new(1001)).unwrap().amount(), 1152);
        assert_eq!(rate.apply_ceil(Money::new(6500)).unwrap().amount(), 7475);
        assert_eq!(rate.apply_ceil(Money::new(0)).unwrap().amount(), 0);
    }

    #[test]
    fn test_half_even_at_exact_half() {
        let half = Rate::from_bps(5000);
        assert_eq!(half.apply_half_even(Money::new(1)).unwrap().amount(), 0); // 0.5
        assert_eq!(half.apply_half_even(Money::new(3)).unwrap().amount(), 2); // 1.5
        assert_eq!(half.apply_half_even(Money::new(5)).unwrap().amount(), 2); // 2.5
        assert_eq!(half.apply_half_even(Money::new(7)).unwrap().amount(), 4); // 3.5
    }

    #[test]
    fn test_half_even_away_from_half() {
        let forty = Rate::from_bps(4000);
        assert_eq!(forty.apply_half_even(Money::new(1)).unwrap().amount(), 0); // 0.4
        assert_eq!(forty.apply_half_even(Money::new(2)).unwrap().amount(), 1); // 0.8
        assert_eq!(forty.apply_half_even(Money::new(4)).unwrap().amount(), 2); // 1.6
        assert_eq!(forty.apply_half_even(Money::new(8)).unwrap().amount(), 3); // 3.2
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(Money::new(i64::MAX / 2).multiply_quantity(3).is_none());
        assert_eq!(
            Money::new(1_000_000_000).multiply_quantity(999).unwrap().amount(),
            999_000_000_000
        );

        let surcharge = Rate::from_bps(11_500);
        assert!(surcharge.apply_ceil(Money::new(i64::MAX)).is_none());
        assert!(surcharge.apply_half_even(Money::new(9_000_000_000_000_000_000)).is_none());
        assert!(Rate::from_bps(4_000).apply_half_even(Money::new(i64::MAX)).is_some());
    }

    #[test]
    fn test_rate_percentage() {
        assert!((Rate::from_bps(1500).percentage() - 15.0).abs() < 0.001);
    }
}
