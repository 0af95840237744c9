//! Order model and lifecycle mutations.

use chrono::{DateTime, Utc};
use common::{OrderId, PatronId, ProductId, VendorId};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::product::{Product, ProductKind, ProductType};
use crate::revenue::RevenueBreakdown;

use super::state::{OrderStatus, PaymentStatus};
use super::OrderError;

/// Contact details captured for a guest checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// The purchasing party: a registered patron or a one-off guest.
///
/// Exactly one of the two, by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Buyer {
    Patron(PatronId),
    Guest(GuestInfo),
}

impl Buyer {
    /// Validates required buyer fields before any order is created.
    pub fn validate(&self) -> Result<(), OrderError> {
        match self {
            Buyer::Patron(_) => Ok(()),
            Buyer::Guest(info) => {
                if info.first_name.trim().is_empty()
                    || info.last_name.trim().is_empty()
                    || info.email.trim().is_empty()
                {
                    Err(OrderError::IncompleteGuestInfo)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Returns the patron ID for a registered buyer.
    pub fn patron_id(&self) -> Option<PatronId> {
        match self {
            Buyer::Patron(id) => Some(*id),
            Buyer::Guest(_) => None,
        }
    }
}

/// A single order line, snapshotted from the product at split time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price copied from the product when the cart was split; later
    /// catalog price changes do not affect existing orders.
    pub unit_price: Money,

    pub line_total: Money,
    pub product_type: ProductType,

    /// When a made-to-order item is expected to finish production.
    pub estimated_completion: Option<DateTime<Utc>>,

    /// Pickup slot for a scheduled-order item.
    pub scheduled_pickup: Option<DateTime<Utc>>,
}

impl LineItem {
    /// Builds a line from a resolved product, snapshotting its price and
    /// deriving the type-specific scheduling fields.
    pub fn from_product(product: &Product, quantity: u32, now: DateTime<Utc>) -> Self {
        let (estimated_completion, scheduled_pickup) = match &product.kind {
            ProductKind::ReadyToShip { .. } => (None, None),
            ProductKind::MadeToOrder {
                lead_time,
                lead_time_unit,
            } => (Some(now + lead_time_unit.duration(*lead_time)), None),
            ProductKind::ScheduledOrder { next_available } => (None, *next_available),
        };

        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price: product.price,
            line_total: product.price.multiply(quantity),
            product_type: product.product_type(),
            estimated_completion,
            scheduled_pickup,
        }
    }
}

/// A per-vendor order produced by the cart splitter, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftOrder {
    pub vendor_id: VendorId,
    pub items: Vec<LineItem>,
    pub total_amount: Money,
}

impl DraftOrder {
    /// Creates an empty draft for a vendor.
    pub fn new(vendor_id: VendorId) -> Self {
        Self {
            vendor_id,
            items: Vec::new(),
            total_amount: Money::zero(),
        }
    }

    /// Appends a line and folds its total into the draft total.
    pub fn push(&mut self, line: LineItem) {
        self.total_amount += line.line_total;
        self.items.push(line);
    }
}

/// The result of a successful status transition, handed to the
/// notification hook by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// The party requesting a payment-status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Vendor(VendorId),
    Patron(PatronId),
}

/// A single-vendor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub vendor_id: VendorId,
    pub buyer: Buyer,
    pub items: Vec<LineItem>,

    /// Always equals the sum of the line totals.
    pub total_amount: Money,

    pub status: OrderStatus,

    /// Shadow statuses mirroring `status` per product type; populated only
    /// while every line item shares that one type.
    pub ready_to_ship_status: Option<OrderStatus>,
    pub made_to_order_status: Option<OrderStatus>,
    pub scheduled_order_status: Option<OrderStatus>,

    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,

    /// Commission breakdown, populated once at creation; overwritten only
    /// by an explicit corrective recompute.
    pub revenue: Option<RevenueBreakdown>,

    pub ready_at: Option<DateTime<Utc>>,
    pub actual_delivery_time: Option<DateTime<Utc>>,

    pub buyer_note: Option<String>,
    pub vendor_note: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Optimistic-concurrency counter, bumped by the order store on save.
    #[serde(default)]
    pub version: u64,
}

impl Order {
    /// Materializes a draft into a full order in the `pending` status.
    pub fn from_draft(
        draft: DraftOrder,
        buyer: Buyer,
        payment_method: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut order = Self {
            id: OrderId::new(),
            vendor_id: draft.vendor_id,
            buyer,
            items: draft.items,
            total_amount: draft.total_amount,
            status: OrderStatus::Pending,
            ready_to_ship_status: None,
            made_to_order_status: None,
            scheduled_order_status: None,
            payment_status: PaymentStatus::Pending,
            payment_method,
            revenue: None,
            ready_at: None,
            actual_delivery_time: None,
            buyer_note: None,
            vendor_note: None,
            created_at: now,
            updated_at: now,
            version: 0,
        };
        order.sync_shadow_status();
        order
    }

    /// Applies a status transition requested by the owning vendor.
    ///
    /// Validates ownership and the transition table, mutates the status and
    /// milestone timestamps, and re-derives the shadow status. Returns the
    /// change so the caller can emit the status-changed notification after
    /// the order is persisted.
    pub fn transition(
        &mut self,
        requested: OrderStatus,
        acting_vendor: VendorId,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, OrderError> {
        if acting_vendor != self.vendor_id {
            return Err(OrderError::VendorMismatch {
                order_id: self.id,
                acting_vendor,
            });
        }

        if !self.status.can_transition_to(requested) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: requested,
            });
        }

        let change = StatusChange {
            from: self.status,
            to: requested,
        };

        self.status = requested;
        self.updated_at = now;
        match requested {
            OrderStatus::Ready => self.ready_at = Some(now),
            OrderStatus::Delivered => self.actual_delivery_time = Some(now),
            _ => {}
        }
        self.sync_shadow_status();

        Ok(change)
    }

    /// Updates the payment status.
    ///
    /// Permitted for the order's vendor or its registered patron buyer.
    /// There is no ordering restriction between payment values; validity is
    /// enforced by the [`PaymentStatus`] enum itself.
    pub fn set_payment_status(
        &mut self,
        new_status: PaymentStatus,
        actor: Actor,
        now: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        let permitted = match actor {
            Actor::Vendor(vendor_id) => vendor_id == self.vendor_id,
            Actor::Patron(patron_id) => self.buyer.patron_id() == Some(patron_id),
        };
        if !permitted {
            return Err(OrderError::PaymentForbidden { order_id: self.id });
        }

        self.payment_status = new_status;
        self.updated_at = now;
        Ok(())
    }

    /// Returns the sum of the line totals.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(|item| item.line_total).sum()
    }

    /// Returns the single product type shared by every line item, if any.
    ///
    /// Mixed-type orders return None and keep all shadow statuses at their
    /// defaults; see the design notes on this deliberately untouched case.
    pub fn uniform_product_type(&self) -> Option<ProductType> {
        let mut types = self.items.iter().map(|item| item.product_type);
        let first = types.next()?;
        types.all(|t| t == first).then_some(first)
    }

    fn sync_shadow_status(&mut self) {
        match self.uniform_product_type() {
            Some(ProductType::ReadyToShip) => self.ready_to_ship_status = Some(self.status),
            Some(ProductType::MadeToOrder) => self.made_to_order_status = Some(self.status),
            Some(ProductType::ScheduledOrder) => self.scheduled_order_status = Some(self.status),
            None => {}
        }
    }
}
