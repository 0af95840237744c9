use common::OrderId;
use thiserror::Error;

/// Errors that can occur when interacting with the backing stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A save raced with another writer: the caller's copy of the order is
    /// stale. Re-read and retry; the store never retries on its own.
    #[error(
        "concurrent modification of order {order_id}: expected version {expected}, found {actual}"
    )]
    ConcurrentModification {
        order_id: OrderId,
        expected: u64,
        actual: u64,
    },

    /// The order being saved does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order with the same ID was already created.
    #[error("order already exists: {0}")]
    DuplicateOrder(OrderId),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
