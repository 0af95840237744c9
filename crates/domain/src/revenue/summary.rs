//! Time-bucketed revenue aggregation for vendors and the platform.

use chrono::{DateTime, Utc};
use common::VendorId;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::order::{Order, OrderStatus};
use crate::promo::PromotionalFeature;

use super::Period;

/// Aggregated revenue for one vendor or the whole platform over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub period: Period,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    pub total_gross: Money,
    pub total_commission: Money,
    pub total_earnings: Money,
    pub order_count: u64,
    pub average_order_value: Money,

    /// Spend on promotional features paid within the window.
    pub promotional_spend: Money,

    /// Earnings minus promotional spend. A negative value is a valid
    /// business outcome, not an error.
    pub net_earnings: Money,

    /// Delivered in-window orders that lacked a usable revenue breakdown
    /// and were excluded from the totals.
    pub skipped_records: u64,
}

/// Summarizes a single vendor's revenue over the given period.
pub fn summarize_vendor_revenue(
    vendor_id: VendorId,
    period: Period,
    now: DateTime<Utc>,
    orders: &[Order],
    paid_promotions: &[PromotionalFeature],
) -> RevenueSummary {
    summarize(
        period,
        now,
        orders.iter().filter(|o| o.vendor_id == vendor_id),
        paid_promotions.iter().filter(|p| p.vendor_id == vendor_id),
    )
}

/// Summarizes platform-wide revenue over the given period.
pub fn summarize_platform_revenue(
    period: Period,
    now: DateTime<Utc>,
    orders: &[Order],
    paid_promotions: &[PromotionalFeature],
) -> RevenueSummary {
    summarize(period, now, orders.iter(), paid_promotions.iter())
}

fn summarize<'a>(
    period: Period,
    now: DateTime<Utc>,
    orders: impl Iterator<Item = &'a Order>,
    paid_promotions: impl Iterator<Item = &'a PromotionalFeature>,
) -> RevenueSummary {
    let (start, end) = period.window(now);

    let mut total_gross = Money::zero();
    let mut total_commission = Money::zero();
    let mut total_earnings = Money::zero();
    let mut order_count: u64 = 0;
    let mut skipped_records: u64 = 0;

    for order in orders {
        if order.status != OrderStatus::Delivered
            || order.created_at < start
            || order.created_at >= end
        {
            continue;
        }

        // Tolerate individual malformed records: skip and count them
        // instead of failing the whole summary.
        match &order.revenue {
            Some(revenue) if revenue.gross_amount.is_positive() => {
                total_gross += revenue.gross_amount;
                total_commission += revenue.platform_commission;
                total_earnings += revenue.artisan_earnings;
                order_count += 1;
            }
            _ => skipped_records += 1,
        }
    }

    if skipped_records > 0 {
        tracing::warn!(
            skipped = skipped_records,
            period = %period,
            "delivered orders without a usable revenue breakdown were excluded from the summary"
        );
    }

    let promotional_spend: Money = paid_promotions
        .filter(|p| p.paid_at.is_some_and(|paid| paid >= start && paid < end))
        .map(|p| p.price)
        .sum();

    RevenueSummary {
        period,
        start,
        end,
        total_gross,
        total_commission,
        total_earnings,
        order_count,
        average_order_value: total_gross.divide(order_count),
        promotional_spend,
        net_earnings: total_earnings - promotional_spend,
        skipped_records,
    }
}
