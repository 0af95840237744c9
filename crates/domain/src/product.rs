//! Product and vendor inputs consumed by the engine.
//!
//! Products and vendors are owned by the catalog side of the platform; the
//! engine treats them as read-only data resolved through the lookup
//! collaborators.

use chrono::{DateTime, Duration, Utc};
use common::{Coordinates, ProductId, VendorId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Product type tag driving order scheduling and shadow status fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Stocked and ships as-is.
    ReadyToShip,

    /// Crafted after purchase; carries a production lead time.
    MadeToOrder,

    /// Produced on a recurring schedule with pickup slots.
    ScheduledOrder,
}

impl ProductType {
    /// Returns the type name as persisted on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::ReadyToShip => "ready_to_ship",
            ProductType::MadeToOrder => "made_to_order",
            ProductType::ScheduledOrder => "scheduled_order",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit for made-to-order production lead times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimeUnit {
    Days,
    Weeks,
}

impl LeadTimeUnit {
    /// Converts a lead time in this unit into a concrete duration.
    pub fn duration(&self, amount: u32) -> Duration {
        match self {
            LeadTimeUnit::Days => Duration::days(amount as i64),
            LeadTimeUnit::Weeks => Duration::weeks(amount as i64),
        }
    }
}

/// Type-specific product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    ReadyToShip {
        stock: u32,
    },
    MadeToOrder {
        lead_time: u32,
        lead_time_unit: LeadTimeUnit,
    },
    ScheduledOrder {
        next_available: Option<DateTime<Utc>>,
    },
}

impl ProductKind {
    /// Returns the product type tag for this kind.
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductKind::ReadyToShip { .. } => ProductType::ReadyToShip,
            ProductKind::MadeToOrder { .. } => ProductType::MadeToOrder,
            ProductKind::ScheduledOrder { .. } => ProductType::ScheduledOrder,
        }
    }
}

/// A catalog product, as read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Owning vendor. A product without one cannot be ordered.
    pub vendor_id: Option<VendorId>,

    pub name: String,

    /// Current listed price; orders snapshot this at split time.
    pub price: Money,

    pub category: Option<String>,

    /// Inactive products are never surfaced by promotional ranking.
    pub is_active: bool,

    #[serde(flatten)]
    pub kind: ProductKind,
}

impl Product {
    /// Returns the product type tag.
    pub fn product_type(&self) -> ProductType {
        self.kind.product_type()
    }
}

/// A vendor profile, as read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub shop_name: String,

    /// Shop coordinates, when the vendor has set a location.
    pub location: Option<Coordinates>,
}
