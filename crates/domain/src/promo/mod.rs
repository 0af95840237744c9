//! Promotional features: model, purchase/review lifecycle, and placement
//! ranking.

mod model;
mod ranking;

pub use model::{
    FeatureType, Performance, PromotionStatus, PromotionalFeature, Specifications,
};
pub use ranking::{Candidate, RankedPlacement, ViewerContext, rank_featured, rank_sponsored};

use thiserror::Error;

/// Errors that can occur on promotional feature operations.
#[derive(Debug, Error)]
pub enum PromoError {
    /// The promotion window is empty or inverted.
    #[error("invalid promotion window: end date must fall after start date")]
    InvalidWindow,

    /// Priority outside the 1..=10 range.
    #[error("invalid priority: {priority} (must be between 1 and 10)")]
    InvalidPriority { priority: u8 },

    /// Non-positive purchase price.
    #[error("invalid promotion price: {price} cents (must be greater than zero)")]
    InvalidPrice { price: i64 },

    /// The operation is not valid in the record's current status.
    #[error("cannot {action} a promotion in {current} status")]
    InvalidStatus {
        current: PromotionStatus,
        action: &'static str,
    },
}
