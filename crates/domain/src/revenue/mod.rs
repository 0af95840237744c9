//! Commission computation and time-bucketed revenue summaries.

mod calculator;
mod period;
mod summary;

pub use calculator::{DEFAULT_COMMISSION_RATE, RevenueBreakdown, compute_order_revenue};
pub use period::Period;
pub use summary::{RevenueSummary, summarize_platform_revenue, summarize_vendor_revenue};

use thiserror::Error;

/// Errors that can occur during revenue computation.
#[derive(Debug, Error)]
pub enum RevenueError {
    /// Revenue was requested for a non-positive order amount. Upstream
    /// validation should make this unreachable; treat occurrences as a
    /// data-integrity signal.
    #[error("invalid amount: {amount} cents (must be greater than zero)")]
    InvalidAmount { amount: i64 },

    /// The commission rate falls outside the valid range.
    #[error("invalid commission rate: {rate} (must be within 0.0..=1.0)")]
    InvalidRate { rate: f64 },

    /// An unrecognized reporting period name.
    #[error("invalid period: {value} (expected week, month, quarter, or year)")]
    InvalidPeriod { value: String },
}
