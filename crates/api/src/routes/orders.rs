//! Checkout and order lifecycle endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{OrderId, PatronId, ProductId, VendorId};
use domain::{Actor, Buyer, CartItem, GuestInfo, Order, OrderStatus, PaymentStatus};
use serde::{Deserialize, Serialize};
use service::CheckoutRequest;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutBody {
    pub patron_id: Option<Uuid>,
    pub guest: Option<GuestBody>,
    pub items: Vec<CartItemBody>,
    pub payment_method: Option<String>,
}

#[derive(Deserialize)]
pub struct GuestBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct CartItemBody {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateStatusBody {
    pub status: OrderStatus,
    pub vendor_id: Uuid,
}

#[derive(Deserialize)]
pub struct UpdatePaymentBody {
    pub payment_status: PaymentStatus,
    pub patron_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub vendor_id: String,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub items: Vec<LineItemResponse>,
    pub total_cents: i64,
    pub ready_to_ship_status: Option<String>,
    pub made_to_order_status: Option<String>,
    pub scheduled_order_status: Option<String>,
    pub revenue: Option<RevenueResponse>,
    pub ready_at: Option<String>,
    pub actual_delivery_time: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct LineItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub product_type: String,
    pub estimated_completion: Option<String>,
    pub scheduled_pickup: Option<String>,
}

#[derive(Serialize)]
pub struct RevenueResponse {
    pub gross_cents: i64,
    pub platform_commission_cents: i64,
    pub artisan_earnings_cents: i64,
    pub commission_rate: f64,
    pub commission_percent: String,
    pub earnings_percent: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        OrderResponse {
            id: order.id.to_string(),
            vendor_id: order.vendor_id.to_string(),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method.clone(),
            items: order
                .items
                .iter()
                .map(|item| LineItemResponse {
                    product_id: item.product_id.to_string(),
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price.cents(),
                    line_total_cents: item.line_total.cents(),
                    product_type: item.product_type.to_string(),
                    estimated_completion: item.estimated_completion.map(|t| t.to_rfc3339()),
                    scheduled_pickup: item.scheduled_pickup.map(|t| t.to_rfc3339()),
                })
                .collect(),
            total_cents: order.total_amount.cents(),
            ready_to_ship_status: order.ready_to_ship_status.map(|s| s.to_string()),
            made_to_order_status: order.made_to_order_status.map(|s| s.to_string()),
            scheduled_order_status: order.scheduled_order_status.map(|s| s.to_string()),
            revenue: order.revenue.as_ref().map(|r| RevenueResponse {
                gross_cents: r.gross_amount.cents(),
                platform_commission_cents: r.platform_commission.cents(),
                artisan_earnings_cents: r.artisan_earnings.cents(),
                commission_rate: r.commission_rate,
                commission_percent: r.commission_percent(),
                earnings_percent: r.earnings_percent(),
            }),
            ready_at: order.ready_at.map(|t| t.to_rfc3339()),
            actual_delivery_time: order.actual_delivery_time.map(|t| t.to_rfc3339()),
            created_at: order.created_at.to_rfc3339(),
            updated_at: order.updated_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /orders — split the cart per vendor and create the orders.
#[tracing::instrument(skip(state, body))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckoutBody>,
) -> Result<(StatusCode, Json<Vec<OrderResponse>>), ApiError> {
    let buyer = match (body.patron_id, body.guest) {
        (Some(patron), None) => Buyer::Patron(PatronId::from_uuid(patron)),
        (None, Some(guest)) => Buyer::Guest(GuestInfo {
            first_name: guest.first_name,
            last_name: guest.last_name,
            email: guest.email,
            phone: guest.phone,
        }),
        _ => {
            return Err(ApiError::BadRequest(
                "buyer must be exactly one of patron_id or guest".to_string(),
            ));
        }
    };

    let items = body
        .items
        .into_iter()
        .map(|item| CartItem {
            product_id: ProductId::new(item.product_id),
            quantity: item.quantity,
        })
        .collect();

    let orders = state
        .orders
        .checkout(CheckoutRequest {
            buyer,
            items,
            payment_method: body.payment_method,
        })
        .await?;

    let responses = orders.iter().map(OrderResponse::from).collect();
    Ok((StatusCode::CREATED, Json(responses)))
}

/// GET /orders/:id — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.orders.get_order(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// PUT /orders/:id/status — apply a vendor-requested status transition.
#[tracing::instrument(skip(state, body))]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state
        .orders
        .transition(order_id, body.status, VendorId::from_uuid(body.vendor_id))
        .await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// PUT /orders/:id/payment — update the payment status as buyer or vendor.
#[tracing::instrument(skip(state, body))]
pub async fn update_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePaymentBody>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let actor = match (body.patron_id, body.vendor_id) {
        (Some(patron), None) => Actor::Patron(PatronId::from_uuid(patron)),
        (None, Some(vendor)) => Actor::Vendor(VendorId::from_uuid(vendor)),
        _ => {
            return Err(ApiError::BadRequest(
                "actor must be exactly one of patron_id or vendor_id".to_string(),
            ));
        }
    };

    let order = state
        .orders
        .set_payment(order_id, body.payment_status, actor)
        .await?;
    Ok(Json(OrderResponse::from(&order)))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order ID: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}
