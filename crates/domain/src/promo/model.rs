//! Promotional feature records.

use chrono::{DateTime, Utc};
use common::{ProductId, PromotionId, VendorId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

use super::PromoError;

/// The kind of placement a vendor purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    FeaturedProduct,
    SponsoredProduct,
}

impl FeatureType {
    /// Returns the type name as persisted on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::FeaturedProduct => "featured_product",
            FeatureType::SponsoredProduct => "sponsored_product",
        }
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Administrative status of a promotional record.
///
/// Purchase creates a record in `PendingApproval`; an administrator moves it
/// to `Approved` or `Rejected`; activation and the time-based sweep to
/// `Completed`/`Expired` are driven by the platform's scheduler, which this
/// engine only observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    PendingApproval,
    Approved,
    Rejected,
    Active,
    Paused,
    Completed,
    Cancelled,
    Expired,
}

impl PromotionStatus {
    /// Returns the status name as persisted on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionStatus::PendingApproval => "pending_approval",
            PromotionStatus::Approved => "approved",
            PromotionStatus::Rejected => "rejected",
            PromotionStatus::Active => "active",
            PromotionStatus::Paused => "paused",
            PromotionStatus::Completed => "completed",
            PromotionStatus::Cancelled => "cancelled",
            PromotionStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vendor-chosen placement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specifications {
    /// Where the placement surfaces, e.g. "homepage" or "search_results".
    pub placement: String,

    /// Ranking weight, 1 (lowest) to 10 (highest).
    pub priority: u8,

    /// Keywords matched against search queries for sponsored relevance.
    pub keywords: Vec<String>,

    /// Category this placement should boost within.
    pub category_boost: Option<String>,

    /// Whether the vendor opted into proximity-weighted placement.
    pub proximity_boost: bool,
}

impl Default for Specifications {
    fn default() -> Self {
        Self {
            placement: "homepage".to_string(),
            priority: 5,
            keywords: Vec::new(),
            category_boost: None,
            proximity_boost: false,
        }
    }
}

/// Cumulative engagement counters, incremented by the analytics pipeline.
/// This engine reads them for reporting but never writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Performance {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: Money,
}

/// A purchased promotional placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionalFeature {
    pub id: PromotionId,
    pub vendor_id: VendorId,
    pub product_id: ProductId,
    pub feature_type: FeatureType,

    /// Half-open visibility window `[start_date, end_date)`.
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    pub status: PromotionStatus,
    pub is_active: bool,

    /// Purchase price, counted as promotional spend once paid.
    pub price: Money,
    pub paid_at: Option<DateTime<Utc>>,

    pub specifications: Specifications,
    pub performance: Performance,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromotionalFeature {
    /// Creates a record from a vendor purchase, pending administrative
    /// approval.
    pub fn purchase(
        vendor_id: VendorId,
        product_id: ProductId,
        feature_type: FeatureType,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        price: Money,
        specifications: Specifications,
        now: DateTime<Utc>,
    ) -> Result<Self, PromoError> {
        if end_date <= start_date {
            return Err(PromoError::InvalidWindow);
        }
        if !(1..=10).contains(&specifications.priority) {
            return Err(PromoError::InvalidPriority {
                priority: specifications.priority,
            });
        }
        if !price.is_positive() {
            return Err(PromoError::InvalidPrice {
                price: price.cents(),
            });
        }

        Ok(Self {
            id: PromotionId::new(),
            vendor_id,
            product_id,
            feature_type,
            start_date,
            end_date,
            status: PromotionStatus::PendingApproval,
            is_active: false,
            price,
            paid_at: Some(now),
            specifications,
            performance: Performance::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Records an administrative approval decision.
    pub fn review(&mut self, approved: bool, now: DateTime<Utc>) -> Result<(), PromoError> {
        if self.status != PromotionStatus::PendingApproval {
            return Err(PromoError::InvalidStatus {
                current: self.status,
                action: "review",
            });
        }
        self.status = if approved {
            PromotionStatus::Approved
        } else {
            PromotionStatus::Rejected
        };
        self.updated_at = now;
        Ok(())
    }

    /// Puts an approved record live.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<(), PromoError> {
        if self.status != PromotionStatus::Approved {
            return Err(PromoError::InvalidStatus {
                current: self.status,
                action: "activate",
            });
        }
        self.status = PromotionStatus::Active;
        self.is_active = true;
        self.updated_at = now;
        Ok(())
    }

    /// Returns true if the record should surface at `now`: active in both
    /// senses and inside its visibility window.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == PromotionStatus::Active
            && self.is_active
            && self.start_date <= now
            && now < self.end_date
    }

    /// Whole days until the window closes, rounded up and clamped at zero.
    ///
    /// Expired records should already have been filtered out; the clamp
    /// keeps the value from ever going negative regardless.
    pub fn remaining_days(&self, now: DateTime<Utc>) -> i64 {
        let seconds = (self.end_date - now).num_seconds();
        if seconds <= 0 {
            0
        } else {
            (seconds + 86_399) / 86_400
        }
    }
}
