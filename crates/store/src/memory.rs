//! In-memory collaborator implementations.
//!
//! These back the test suites and the default composition root, and model
//! the same optimistic-concurrency behavior a database-backed store would.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{OrderId, ProductId, VendorId};
use domain::{FeatureType, Order, OrderStatus, Product, PromotionalFeature, Vendor};

use crate::error::{Result, StoreError};
use crate::traits::{NotificationSink, OrderStore, ProductLookup, PromotionPool, VendorDirectory};

/// In-memory order store with optimistic concurrency.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.orders.read().expect("order store lock poisoned").len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut orders = self.orders.write().expect("order store lock poisoned");
        if orders.contains_key(&order.id) {
            return Err(StoreError::DuplicateOrder(order.id));
        }
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().expect("order store lock poisoned");
        Ok(orders.get(&order_id).cloned())
    }

    async fn save(&self, mut order: Order) -> Result<Order> {
        let mut orders = self.orders.write().expect("order store lock poisoned");
        let stored = orders
            .get(&order.id)
            .ok_or(StoreError::OrderNotFound(order.id))?;

        if stored.version != order.version {
            return Err(StoreError::ConcurrentModification {
                order_id: order.id,
                expected: order.version,
                actual: stored.version,
            });
        }

        order.version += 1;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn list_by_vendor(&self, vendor_id: VendorId) -> Result<Vec<Order>> {
        let orders = self.orders.read().expect("order store lock poisoned");
        Ok(orders
            .values()
            .filter(|o| o.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().expect("order store lock poisoned");
        Ok(orders.values().cloned().collect())
    }
}

/// In-memory product catalog.
#[derive(Clone, Default)]
pub struct InMemoryProductCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: Product) {
        self.products
            .write()
            .expect("catalog lock poisoned")
            .insert(product.id.clone(), product);
    }
}

#[async_trait]
impl ProductLookup for InMemoryProductCatalog {
    async fn get(&self, product_id: &ProductId) -> Result<Option<Product>> {
        let products = self.products.read().expect("catalog lock poisoned");
        Ok(products.get(product_id).cloned())
    }
}

/// In-memory vendor directory.
#[derive(Clone, Default)]
pub struct InMemoryVendorDirectory {
    vendors: Arc<RwLock<HashMap<VendorId, Vendor>>>,
}

impl InMemoryVendorDirectory {
    /// Creates a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a vendor profile.
    pub fn insert(&self, vendor: Vendor) {
        self.vendors
            .write()
            .expect("vendor directory lock poisoned")
            .insert(vendor.id, vendor);
    }
}

#[async_trait]
impl VendorDirectory for InMemoryVendorDirectory {
    async fn get(&self, vendor_id: VendorId) -> Result<Option<Vendor>> {
        let vendors = self.vendors.read().expect("vendor directory lock poisoned");
        Ok(vendors.get(&vendor_id).cloned())
    }
}

/// In-memory promotion pool.
#[derive(Clone, Default)]
pub struct InMemoryPromotionPool {
    records: Arc<RwLock<Vec<PromotionalFeature>>>,
}

impl InMemoryPromotionPool {
    /// Creates a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record.
    pub fn insert(&self, record: PromotionalFeature) {
        self.records
            .write()
            .expect("promotion pool lock poisoned")
            .push(record);
    }
}

#[async_trait]
impl PromotionPool for InMemoryPromotionPool {
    async fn active_records(&self, feature_type: FeatureType) -> Result<Vec<PromotionalFeature>> {
        let records = self.records.read().expect("promotion pool lock poisoned");
        Ok(records
            .iter()
            .filter(|r| r.feature_type == feature_type && r.status == domain::PromotionStatus::Active)
            .cloned()
            .collect())
    }

    async fn paid_records(&self, vendor_id: Option<VendorId>) -> Result<Vec<PromotionalFeature>> {
        let records = self.records.read().expect("promotion pool lock poisoned");
        Ok(records
            .iter()
            .filter(|r| r.paid_at.is_some())
            .filter(|r| vendor_id.is_none_or(|v| r.vendor_id == v))
            .cloned()
            .collect())
    }
}

/// Notification sink that records every call, for tests.
#[derive(Clone, Default)]
pub struct InMemoryNotificationSink {
    notifications: Arc<RwLock<Vec<(OrderId, OrderStatus, OrderStatus)>>>,
}

impl InMemoryNotificationSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded (order, previous, new) notification.
    pub fn notifications(&self) -> Vec<(OrderId, OrderStatus, OrderStatus)> {
        self.notifications
            .read()
            .expect("notification sink lock poisoned")
            .clone()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn order_status_changed(
        &self,
        order: &Order,
        previous: OrderStatus,
        new_status: OrderStatus,
    ) {
        self.notifications
            .write()
            .expect("notification sink lock poisoned")
            .push((order.id, previous, new_status));
    }
}
