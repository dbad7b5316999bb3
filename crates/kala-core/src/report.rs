//! # Report Totals
//!
//! Aggregates shown on the dashboard and the commissions page.
//!
//! The two pages round commissions differently:
//!
//! ```text
//! Dashboard:    Σ commission_for_base(base_i)   (per sale, then summed)
//! Commissions:  commission_for_base(Σ base_i)   (summed, then once)
//! ```
//!
//! Both come straight from the recorded `commission_base`, never from the
//! amount charged.

use serde::Serialize;

use crate::money::Money;
use crate::pricing::commission_for_base;

/// The two amounts of a recorded sale that reports need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleLine {
    pub price_charged: Money,
    pub commission_base: Money,
}

impl SaleLine {
    pub fn new(price_charged: i64, commission_base: i64) -> Self {
        SaleLine {
            price_charged: Money::new(price_charged),
            commission_base: Money::new(commission_base),
        }
    }
}

/// Headline numbers on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    /// What clients paid.
    pub total_billed: Money,
    /// Commission owed, rounded sale by sale.
    pub total_commission: Money,
}

impl DashboardTotals {
    pub fn from_sales<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = SaleLine>,
    {
        lines
            .into_iter()
            .fold(DashboardTotals::default(), |mut acc, line| {
                acc.total_billed += line.price_charged;
                acc.total_commission += commission_for_base(line.commission_base);
                acc
            })
    }
}

/// The commissions page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommissionReport {
    /// Σ cash-equivalent bases.
    pub total_base: Money,
    /// Commission on the total base.
    pub total_commission: Money,
    /// What clients paid.
    pub total_billed: Money,
}

impl CommissionReport {
    pub fn from_sales<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = SaleLine>,
    {
        let (total_base, total_billed) = lines
            .into_iter()
            .fold((Money::zero(), Money::zero()), |(base, billed), line| {
                (base + line.commission_base, billed + line.price_charged)
            });

        CommissionReport {
            total_base,
            total_commission: commission_for_base(total_base),
            total_billed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reports_are_zero() {
        assert_eq!(DashboardTotals::from_sales(Vec::new()), DashboardTotals::default());
        assert_eq!(CommissionReport::from_sales(Vec::new()), CommissionReport::default());
    }

    #[test]
    fn test_dashboard_uses_commission_base_not_charged() {
        let totals = DashboardTotals::from_sales(vec![
            SaleLine::new(1150, 1000), // transfer with surcharge
            SaleLine::new(1000, 1000), // cash
        ]);
        assert_eq!(totals.total_billed.amount(), 2150);
        assert_eq!(totals.total_commission.amount(), 800);
    }

    #[test]
    fn test_dashboard_rounds_per_sale() {
        // 0.8 + 0.8 + 0.8 → 1 + 1 + 1
        let totals = DashboardTotals::from_sales(vec![SaleLine::new(2, 2); 3]);
        assert_eq!(totals.total_commission.amount(), 3);
    }

    #[test]
    fn test_commission_report_rounds_once_on_total() {
        // Σ base = 6 → 2.4 → 2
        let report = CommissionReport::from_sales(vec![SaleLine::new(3, 2); 3]);
        assert_eq!(report.total_base.amount(), 6);
        assert_eq!(report.total_commission.amount(), 2);
        assert_eq!(report.total_billed.amount(), 9);
    }
}
