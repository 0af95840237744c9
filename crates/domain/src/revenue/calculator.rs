//! Per-order commission breakdown.

use serde::{Deserialize, Serialize};

use crate::money::Money;

use super::RevenueError;

/// Platform commission rate applied when no override is given.
pub const DEFAULT_COMMISSION_RATE: f64 = 0.10;

/// The gross/commission/earnings split for a single order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    /// Total order value before deductions; equals the order total.
    pub gross_amount: Money,

    /// The platform's cut, rounded to the nearest cent.
    pub platform_commission: Money,

    /// The vendor's share: gross minus commission. Never rounded on its
    /// own, so the two parts always sum exactly to the gross amount.
    pub artisan_earnings: Money,

    /// Rate the commission was computed at.
    pub commission_rate: f64,
}

impl RevenueBreakdown {
    /// Commission rate as a display string, e.g. `"10.0%"`.
    pub fn commission_percent(&self) -> String {
        format!("{:.1}%", self.commission_rate * 100.0)
    }

    /// Vendor share as a display string, e.g. `"90.0%"`.
    pub fn earnings_percent(&self) -> String {
        format!("{:.1}%", (1.0 - self.commission_rate) * 100.0)
    }
}

/// Computes the revenue split for a completed order amount.
///
/// Idempotent: the same amount and rate always produce the same breakdown,
/// and a corrective recompute simply replaces the stored value.
pub fn compute_order_revenue(
    gross_amount: Money,
    commission_rate: f64,
) -> Result<RevenueBreakdown, RevenueError> {
    if !gross_amount.is_positive() {
        return Err(RevenueError::InvalidAmount {
            amount: gross_amount.cents(),
        });
    }
    if !(0.0..=1.0).contains(&commission_rate) {
        return Err(RevenueError::InvalidRate {
            rate: commission_rate,
        });
    }

    let platform_commission = gross_amount.percentage(commission_rate);
    let artisan_earnings = gross_amount - platform_commission;

    Ok(RevenueBreakdown {
        gross_amount,
        platform_commission,
        artisan_earnings,
        commission_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate_split() {
        let breakdown = compute_order_revenue(Money::from_dollars(100), DEFAULT_COMMISSION_RATE)
            .unwrap();

        assert_eq!(breakdown.gross_amount.cents(), 10000);
        assert_eq!(breakdown.platform_commission.cents(), 1000);
        assert_eq!(breakdown.artisan_earnings.cents(), 9000);
        assert_eq!(breakdown.commission_percent(), "10.0%");
        assert_eq!(breakdown.earnings_percent(), "90.0%");
    }

    #[test]
    fn test_sum_invariant_holds_for_awkward_rates() {
        for cents in [1, 3, 99, 1001, 12345, 999_999] {
            for rate in [0.0, 0.07, 0.1, 1.0 / 3.0, 0.155, 0.5, 0.99, 1.0] {
                let gross = Money::from_cents(cents);
                let breakdown = compute_order_revenue(gross, rate).unwrap();
                assert_eq!(
                    breakdown.platform_commission + breakdown.artisan_earnings,
                    gross,
                    "rate {rate} on {cents} cents drifted"
                );
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let gross = Money::from_cents(4242);
        let first = compute_order_revenue(gross, 0.12).unwrap();
        let second = compute_order_revenue(gross, 0.12).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(matches!(
            compute_order_revenue(Money::zero(), 0.10),
            Err(RevenueError::InvalidAmount { amount: 0 })
        ));
        assert!(matches!(
            compute_order_revenue(Money::from_cents(-100), 0.10),
            Err(RevenueError::InvalidAmount { amount: -100 })
        ));
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        assert!(matches!(
            compute_order_revenue(Money::from_cents(100), -0.1),
            Err(RevenueError::InvalidRate { .. })
        ));
        assert!(matches!(
            compute_order_revenue(Money::from_cents(100), 1.5),
            Err(RevenueError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_fractional_cent_commission_rounds() {
        // 10% of $0.05 is half a cent; rounds up to one cent
        let breakdown = compute_order_revenue(Money::from_cents(5), 0.10).unwrap();
        assert_eq!(breakdown.platform_commission.cents(), 1);
        assert_eq!(breakdown.artisan_earnings.cents(), 4);
    }
}
