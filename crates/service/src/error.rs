use common::OrderId;
use domain::{OrderError, PromoError, RevenueError};
use store::StoreError;
use thiserror::Error;

/// Errors surfaced by the service flows.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced order does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order operation was rejected by the engine.
    #[error("order error: {0}")]
    Order(#[from] OrderError),

    /// A revenue computation was rejected by the engine.
    #[error("revenue error: {0}")]
    Revenue(#[from] RevenueError),

    /// A promotional operation was rejected by the engine.
    #[error("promotion error: {0}")]
    Promotion(#[from] PromoError),

    /// A backing store failed or detected a conflict.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
