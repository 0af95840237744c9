//! Checkout and order lifecycle flows.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::{OrderId, ProductId, VendorId};
use domain::{
    Actor, Buyer, CartItem, DEFAULT_COMMISSION_RATE, Order, OrderStatus, PaymentStatus, Product,
    compute_order_revenue, split_cart,
};
use store::{NotificationSink, OrderStore, ProductLookup};

use crate::error::ServiceError;

/// Everything needed to turn a cart into per-vendor orders.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub buyer: Buyer,
    pub items: Vec<CartItem>,
    pub payment_method: Option<String>,
}

/// Order creation and lifecycle mutations.
pub struct OrderFlows {
    store: Arc<dyn OrderStore>,
    products: Arc<dyn ProductLookup>,
    notifications: Arc<dyn NotificationSink>,
}

impl OrderFlows {
    /// Creates the flow over the injected collaborators.
    pub fn new(
        store: Arc<dyn OrderStore>,
        products: Arc<dyn ProductLookup>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            products,
            notifications,
        }
    }

    /// Splits the cart per vendor, computes each order's revenue split, and
    /// persists the resulting orders.
    ///
    /// All validation happens before the first write, so a rejected request
    /// leaves nothing behind.
    #[tracing::instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<Vec<Order>, ServiceError> {
        request.buyer.validate()?;
        if request.items.is_empty() {
            return Err(domain::OrderError::EmptyCart.into());
        }

        // Resolve each distinct product once; unresolved ids surface as
        // ProductNotFound from the splitter below.
        let mut resolved: HashMap<ProductId, Product> = HashMap::new();
        for item in &request.items {
            if resolved.contains_key(&item.product_id) {
                continue;
            }
            if let Some(product) = self.products.get(&item.product_id).await? {
                resolved.insert(item.product_id.clone(), product);
            }
        }

        let now = Utc::now();
        let drafts = split_cart(&request.items, |id| resolved.get(id).cloned(), now)?;

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let mut order = Order::from_draft(
                draft,
                request.buyer.clone(),
                request.payment_method.clone(),
                now,
            );
            order.revenue = Some(compute_order_revenue(
                order.total_amount,
                DEFAULT_COMMISSION_RATE,
            )?);
            created.push(self.store.create(order).await?);
        }

        metrics::counter!("orders_created_total").increment(created.len() as u64);
        tracing::info!(orders = created.len(), "checkout complete");
        Ok(created)
    }

    /// Loads an order by ID.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, ServiceError> {
        self.store
            .get(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))
    }

    /// Applies a vendor-requested status transition and emits the
    /// status-changed notification once the order is saved.
    ///
    /// A concurrent writer makes the save fail with a conflict; the caller
    /// re-reads and retries. No notification fires for a failed attempt.
    #[tracing::instrument(skip(self))]
    pub async fn transition(
        &self,
        order_id: OrderId,
        requested: OrderStatus,
        acting_vendor: VendorId,
    ) -> Result<Order, ServiceError> {
        let mut order = self.get_order(order_id).await?;
        let change = order.transition(requested, acting_vendor, Utc::now())?;
        let saved = self.store.save(order).await?;

        self.notifications
            .order_status_changed(&saved, change.from, change.to)
            .await;
        metrics::counter!("order_status_transitions_total").increment(1);
        Ok(saved)
    }

    /// Updates the payment status on behalf of the order's buyer or vendor.
    #[tracing::instrument(skip(self))]
    pub async fn set_payment(
        &self,
        order_id: OrderId,
        new_status: PaymentStatus,
        actor: Actor,
    ) -> Result<Order, ServiceError> {
        let mut order = self.get_order(order_id).await?;
        order.set_payment_status(new_status, actor, Utc::now())?;
        Ok(self.store.save(order).await?)
    }

    /// Corrective revenue recompute: replaces the stored breakdown.
    #[tracing::instrument(skip(self))]
    pub async fn recompute_revenue(
        &self,
        order_id: OrderId,
        commission_rate: f64,
    ) -> Result<Order, ServiceError> {
        let mut order = self.get_order(order_id).await?;
        order.revenue = Some(compute_order_revenue(order.total_amount, commission_rate)?);
        order.updated_at = Utc::now();
        Ok(self.store.save(order).await?)
    }
}
