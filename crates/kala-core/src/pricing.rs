//! # Pricing & Commission
//!
//! The two rules every sale goes through.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     What a sale records                                 │
//! │                                                                         │
//! │  Catalog item (cash 1000, transfer None)                               │
//! │       │                                                                 │
//! │       ├── price_for_medium(.., Transfer) ──► price_charged = 1150      │
//! │       │                                                                 │
//! │       └── cash × qty ──────────────────────► commission_base = 1000    │
//! │                                                                         │
//! │  Reports                                                               │
//! │       └── commission_for_base(1000) ───────► 400 (never stored)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commissions are always computed on the cash price, so the surcharge paid
//! on transfers and cards never inflates what the employee earns.

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};
use crate::types::PaymentMethod;

/// Employee commission on the cash-equivalent base.
pub const COMMISSION_RATE: Rate = Rate::from_bps(4_000);

/// Surcharge applied to transfer and card payments without an explicit price.
pub const TRANSFER_SURCHARGE: Rate = Rate::from_bps(1_500);

/// Multiplier for a surcharged price (100% + surcharge).
const SURCHARGED_TOTAL: Rate = Rate::from_bps(10_000 + TRANSFER_SURCHARGE.bps());

/// Resolves the amount charged to the client.
///
/// - Cash pays the cash price.
/// - Transfer and card pay the explicit transfer price when the item has one,
///   otherwise the cash price plus 15%, rounded up to the next peso.
///
/// Fails with [`CoreError::AmountOverflow`] only when the surcharged price
/// does not fit in an `i64`.
///
/// ## Example
/// ```rust
/// use kala_core::money::Money;
/// use kala_core::pricing::price_for_medium;
/// use kala_core::PaymentMethod;
///
/// let cash = Money::new(1001);
/// assert_eq!(price_for_medium(cash, None, PaymentMethod::Cash).unwrap().amount(), 1001);
/// assert_eq!(price_for_medium(cash, None, PaymentMethod::Card).unwrap().amount(), 1152);
/// assert_eq!(
///     price_for_medium(cash, Some(Money::new(1100)), PaymentMethod::Transfer)
///         .unwrap()
///         .amount(),
///     1100
/// );
/// ```
pub fn price_for_medium(
    cash: Money,
    transfer: Option<Money>,
    method: PaymentMethod,
) -> CoreResult<Money> {
    match (method, transfer) {
        (PaymentMethod::Cash, _) => Ok(cash),
        (_, Some(transfer)) => Ok(transfer),
        (_, None) => surcharged_price(cash),
    }
}

/// `ceiling(cash × 1.15)`.
pub fn surcharged_price(cash: Money) -> CoreResult<Money> {
    SURCHARGED_TOTAL
        .apply_ceil(cash)
        .ok_or(CoreError::AmountOverflow)
}

/// Resolves the commission owed on a cash-equivalent base.
///
/// 40% of the base, rounded half to even. Forty percent of a whole number
/// only ever has a fractional part of .0, .2, .4, .6 or .8, so ties cannot
/// occur for integer bases; the tie rule is pinned in `Rate::apply_half_even`.
pub fn commission_for_base(base: Money) -> Money {
    // A rate under 100% cannot leave the i64 range.
    COMMISSION_RATE.apply_half_even(base).unwrap_or(base)
}

/// The commission base recorded on a sale: cash price times quantity.
#[inline]
pub fn commission_base(cash: Money, quantity: i64) -> CoreResult<Money> {
    cash.multiply_quantity(quantity)
        .ok_or(CoreError::AmountOverflow)
}

/// The amount charged for `quantity` units paid with `method`.
pub fn line_total(
    cash: Money,
    transfer: Option<Money>,
    method: PaymentMethod,
    quantity: i64,
) -> CoreResult<Money> {
    price_for_medium(cash, transfer, method)?
        .multiply_quantity(quantity)
        .ok_or(CoreError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_pays_cash_price() {
        assert_eq!(
            price_for_medium(Money::new(1000), None, PaymentMethod::Cash).unwrap().amount(),
            1000
        );
    }

    #[test]
    fn test_cash_ignores_transfer_price() {
        let charged =
            price_for_medium(Money::new(1000), Some(Money::new(1100)), PaymentMethod::Cash).unwrap();
        assert_eq!(charged.amount(), 1000);
    }

    #[test]
    fn test_transfer_without_explicit_price_adds_surcharge() {
        assert_eq!(
            price_for_medium(Money::new(1000), None, PaymentMethod::Transfer).unwrap().amount(),
            1150
        );
    }

    #[test]
    fn test_explicit_transfer_price_wins() {
        let charged = price_for_medium(
            Money::new(1000),
            Some(Money::new(1100)),
            PaymentMethod::Transfer,
        )
        .unwrap();
        assert_eq!(charged.amount(), 1100);
    }

    #[test]
    fn test_card_rounds_surcharge_up() {
        // 1001 × 1.15 = 1151.15
        assert_eq!(
            price_for_medium(Money::new(1001), None, PaymentMethod::Card).unwrap().amount(),
            1152
        );
    }

    #[test]
    fn test_surcharge_is_exact_where_floats_drift() {
        // 6500 × 1.15 is 7474.999... in binary floating point
        assert_eq!(surcharged_price(Money::new(6500)).unwrap().amount(), 7475);
        assert_eq!(surcharged_price(Money::new(12_000)).unwrap().amount(), 13_800);
    }

    #[test]
    fn test_commission_for_base() {
        assert_eq!(commission_for_base(Money::new(1000)).amount(), 400);
        assert_eq!(commission_for_base(Money::new(52_500)).amount(), 21_000);
        assert_eq!(commission_for_base(Money::new(0)).amount(), 0);
    }

    #[test]
    fn test_commission_rounds_to_nearest() {
        assert_eq!(commission_for_base(Money::new(1)).amount(), 0); // 0.4
        assert_eq!(commission_for_base(Money::new(2)).amount(), 1); // 0.8
        assert_eq!(commission_for_base(Money::new(7)).amount(), 3); // 2.8
        assert_eq!(commission_for_base(Money::new(9)).amount(), 4); // 3.6
        assert_eq!(commission_for_base(Money::new(11)).amount(), 4); // 4.4
    }

    #[test]
    fn test_commission_base_ignores_payment_method() {
        let cash = Money::new(8_500);
        let base = commission_base(cash, 3).unwrap();
        assert_eq!(base.amount(), 25_500);

        for method in PaymentMethod::ALL {
            let charged = line_total(cash, None, method, 3).unwrap();
            assert!(charged >= base);
            assert_eq!(commission_base(cash, 3).unwrap(), base);
        }
    }

    #[test]
    fn test_line_total() {
        let total = line_total(Money::new(1001), None, PaymentMethod::Card, 2).unwrap();
        assert_eq!(total.amount(), 2304);
    }

    #[test]
    fn test_overflow_is_an_error_not_a_wrapped_amount() {
        let huge = Money::new(9_000_000_000_000_000_000);
        assert!(matches!(
            price_for_medium(huge, None, PaymentMethod::Card),
            Err(CoreError::AmountOverflow)
        ));
        assert!(matches!(commission_base(huge, 2), Err(CoreError::AmountOverflow)));
        assert!(matches!(
            line_total(Money::new(i64::MAX / 2), Some(Money::new(i64::MAX / 2)), PaymentMethod::Transfer, 3),
            Err(CoreError::AmountOverflow)
        ));
        assert_eq!(commission_for_base(Money::new(i64::MAX)).amount(), 3_689_348_814_741_910_323);
    }
}
