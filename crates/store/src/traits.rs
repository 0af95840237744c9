//! The collaborator traits the service layer is generic over.

use async_trait::async_trait;
use common::{OrderId, ProductId, VendorId};
use domain::{FeatureType, Order, OrderStatus, Product, PromotionalFeature, Vendor};

use crate::error::Result;

/// Persistence for orders, with optimistic concurrency on save.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a newly created order.
    async fn create(&self, order: Order) -> Result<Order>;

    /// Loads an order by ID. Returns None if it doesn't exist.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Saves a mutated order.
    ///
    /// The caller's `order.version` must match the stored version;
    /// otherwise the save fails with
    /// [`StoreError::ConcurrentModification`](crate::StoreError::ConcurrentModification)
    /// and the caller must re-read before retrying. On success the stored
    /// version is bumped and the updated order returned.
    async fn save(&self, order: Order) -> Result<Order>;

    /// Lists every order belonging to a vendor.
    async fn list_by_vendor(&self, vendor_id: VendorId) -> Result<Vec<Order>>;

    /// Lists every order on the platform.
    async fn list_all(&self) -> Result<Vec<Order>>;
}

/// Read access to the product catalog.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Resolves a product reference. Returns None for unknown ids.
    async fn get(&self, product_id: &ProductId) -> Result<Option<Product>>;
}

/// Read access to vendor profiles (shop name, coordinates).
#[async_trait]
pub trait VendorDirectory: Send + Sync {
    /// Resolves a vendor reference. Returns None for unknown ids.
    async fn get(&self, vendor_id: VendorId) -> Result<Option<Vendor>>;
}

/// Read access to promotional feature records.
#[async_trait]
pub trait PromotionPool: Send + Sync {
    /// Returns records of the given type in `active` status. The ranking
    /// engine re-checks full liveness itself.
    async fn active_records(&self, feature_type: FeatureType) -> Result<Vec<PromotionalFeature>>;

    /// Returns paid records, optionally scoped to one vendor, for
    /// promotional-spend aggregation.
    async fn paid_records(&self, vendor_id: Option<VendorId>) -> Result<Vec<PromotionalFeature>>;
}

/// Outbound notification hook; delivery is someone else's problem.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Fire-and-forget signal that an order moved between statuses.
    async fn order_status_changed(
        &self,
        order: &Order,
        previous: OrderStatus,
        new_status: OrderStatus,
    );
}
