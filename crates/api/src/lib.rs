//! HTTP API server for the marketplace engine.
//!
//! Exposes checkout, order lifecycle, revenue reporting, and promotional
//! placement endpoints, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use service::{OrderFlows, PromoPlacements, RevenueReports};
use store::{
    InMemoryNotificationSink, InMemoryOrderStore, InMemoryProductCatalog, InMemoryPromotionPool,
    InMemoryVendorDirectory,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orders: OrderFlows,
    pub reports: RevenueReports,
    pub placements: PromoPlacements,
}

/// The in-memory collaborators behind the default state, kept accessible
/// for seeding in tests and demos.
pub struct DefaultStores {
    pub orders: Arc<InMemoryOrderStore>,
    pub catalog: Arc<InMemoryProductCatalog>,
    pub promotions: Arc<InMemoryPromotionPool>,
    pub vendors: Arc<InMemoryVendorDirectory>,
    pub notifications: Arc<InMemoryNotificationSink>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create))
        .route("/orders/{id}", get(routes::orders::get_order))
        .route("/orders/{id}/status", put(routes::orders::update_status))
        .route("/orders/{id}/payment", put(routes::orders::update_payment))
        .route(
            "/revenue/artisan/summary",
            get(routes::revenue::artisan_summary),
        )
        .route(
            "/revenue/platform/summary",
            get(routes::revenue::platform_summary),
        )
        .route(
            "/promotional/products/featured",
            get(routes::promotions::featured),
        )
        .route(
            "/promotional/products/sponsored",
            get(routes::promotions::sponsored),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over in-memory collaborators.
pub fn create_default_state() -> (Arc<AppState>, DefaultStores) {
    let orders = Arc::new(InMemoryOrderStore::new());
    let catalog = Arc::new(InMemoryProductCatalog::new());
    let promotions = Arc::new(InMemoryPromotionPool::new());
    let vendors = Arc::new(InMemoryVendorDirectory::new());
    let notifications = Arc::new(InMemoryNotificationSink::new());

    let state = Arc::new(AppState {
        orders: OrderFlows::new(orders.clone(), catalog.clone(), notifications.clone()),
        reports: RevenueReports::new(orders.clone(), promotions.clone()),
        placements: PromoPlacements::new(promotions.clone(), catalog.clone(), vendors.clone()),
    });

    let stores = DefaultStores {
        orders,
        catalog,
        promotions,
        vendors,
        notifications,
    };

    (state, stores)
}
