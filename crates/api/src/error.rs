//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{OrderError, PromoError, RevenueError};
use service::ServiceError;
use store::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Service flow error.
    Service(ServiceError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(err) => service_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn service_error_to_response(err: ServiceError) -> (StatusCode, String) {
    match &err {
        ServiceError::OrderNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::Order(order_err) => match order_err {
            OrderError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
            OrderError::VendorMismatch { .. } | OrderError::PaymentForbidden { .. } => {
                (StatusCode::FORBIDDEN, err.to_string())
            }
            OrderError::InvalidTransition { .. }
            | OrderError::MissingVendor { .. }
            | OrderError::InvalidQuantity { .. }
            | OrderError::EmptyCart
            | OrderError::IncompleteGuestInfo => (StatusCode::BAD_REQUEST, err.to_string()),
        },
        ServiceError::Revenue(revenue_err) => match revenue_err {
            RevenueError::InvalidAmount { .. } => {
                // should be unreachable given upstream validation
                tracing::error!(error = %err, "revenue data-integrity violation");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            RevenueError::InvalidRate { .. } | RevenueError::InvalidPeriod { .. } => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        },
        ServiceError::Promotion(promo_err) => match promo_err {
            PromoError::InvalidStatus { .. } => (StatusCode::CONFLICT, err.to_string()),
            _ => (StatusCode::BAD_REQUEST, err.to_string()),
        },
        ServiceError::Store(StoreError::ConcurrentModification { .. }) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        ServiceError::Store(StoreError::OrderNotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        ServiceError::Store(_) => {
            tracing::error!(error = %err, "store failure");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}
