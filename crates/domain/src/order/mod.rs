//! Orders: model, splitter, and lifecycle state machine.

mod model;
mod splitter;
mod state;

pub use model::{Actor, Buyer, DraftOrder, GuestInfo, LineItem, Order, StatusChange};
pub use splitter::{CartItem, split_cart};
pub use state::{OrderStatus, PaymentStatus};

use common::{OrderId, ProductId, VendorId};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A cart item referenced a product that does not exist.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: ProductId },

    /// A resolved product has no owning vendor and cannot be ordered.
    #[error("product {product_id} has no owning vendor")]
    MissingVendor { product_id: ProductId },

    /// Invalid line item quantity.
    #[error("invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity { quantity: u32 },

    /// Checkout was attempted with an empty cart.
    #[error("cart has no items")]
    EmptyCart,

    /// A guest buyer is missing a required contact field.
    #[error("guest buyer is missing required contact details")]
    IncompleteGuestInfo,

    /// The requested status is not reachable from the current one.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The acting vendor does not own the order.
    #[error("vendor {acting_vendor} does not own order {order_id}")]
    VendorMismatch {
        order_id: OrderId,
        acting_vendor: VendorId,
    },

    /// The actor is neither the order's buyer nor its vendor.
    #[error("actor may not update payment status of order {order_id}")]
    PaymentForbidden { order_id: OrderId },
}
