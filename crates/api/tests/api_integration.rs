//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::{Coordinates, ProductId, VendorId};
use domain::{
    FeatureType, Money, Product, ProductKind, PromotionalFeature, Specifications, Vendor,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;
use uuid::Uuid;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, api::DefaultStores) {
    let (state, stores) = api::create_default_state();
    let app = api::create_app(state, get_metrics_handle());
    (app, stores)
}

fn seed_product(stores: &api::DefaultStores, sku: &str, vendor_id: VendorId, cents: i64) {
    stores.catalog.insert(Product {
        id: ProductId::new(sku),
        vendor_id: Some(vendor_id),
        name: format!("Product {sku}"),
        price: Money::from_cents(cents),
        category: Some("pottery".into()),
        is_active: true,
        kind: ProductKind::ReadyToShip { stock: 10 },
    });
}

async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send_get(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn checkout_body(patron: Uuid, items: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "patron_id": patron.to_string(),
        "items": items,
        "payment_method": "card"
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();
    let (status, json) = send_get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _) = setup();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_splits_cart_per_vendor() {
    let (app, stores) = setup();
    let vendor_a = VendorId::new();
    let vendor_b = VendorId::new();
    seed_product(&stores, "SKU-A", vendor_a, 1000);
    seed_product(&stores, "SKU-B", vendor_b, 500);

    let (status, json) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            Uuid::new_v4(),
            serde_json::json!([
                { "product_id": "SKU-A", "quantity": 2 },
                { "product_id": "SKU-B", "quantity": 1 }
            ]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let orders = json.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["total_cents"], 2000);
    assert_eq!(orders[1]["total_cents"], 500);
    assert_eq!(orders[0]["status"], "pending");

    // revenue is computed at creation
    assert_eq!(orders[0]["revenue"]["gross_cents"], 2000);
    assert_eq!(orders[0]["revenue"]["platform_commission_cents"], 200);
    assert_eq!(orders[0]["revenue"]["artisan_earnings_cents"], 1800);
    assert_eq!(orders[0]["revenue"]["commission_percent"], "10.0%");
    assert_eq!(orders[0]["revenue"]["earnings_percent"], "90.0%");

    // single-type order gets its shadow status
    assert_eq!(orders[0]["ready_to_ship_status"], "pending");
}

#[tokio::test]
async fn test_checkout_unknown_product_is_404() {
    let (app, _) = setup();
    let (status, json) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            Uuid::new_v4(),
            serde_json::json!([{ "product_id": "SKU-NOPE", "quantity": 1 }]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("SKU-NOPE"));
}

#[tokio::test]
async fn test_checkout_requires_exactly_one_buyer() {
    let (app, stores) = setup();
    seed_product(&stores, "SKU-A", VendorId::new(), 1000);

    let (status, _) = send_json(
        &app,
        "POST",
        "/orders",
        serde_json::json!({
            "items": [{ "product_id": "SKU-A", "quantity": 1 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        "/orders",
        serde_json::json!({
            "patron_id": Uuid::new_v4().to_string(),
            "guest": {
                "first_name": "Ada",
                "last_name": "Umeh",
                "email": "ada@example.com"
            },
            "items": [{ "product_id": "SKU-A", "quantity": 1 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guest_checkout_succeeds() {
    let (app, stores) = setup();
    seed_product(&stores, "SKU-A", VendorId::new(), 1500);

    let (status, json) = send_json(
        &app,
        "POST",
        "/orders",
        serde_json::json!({
            "guest": {
                "first_name": "Ada",
                "last_name": "Umeh",
                "email": "ada@example.com",
                "phone": "+2348012345678"
            },
            "items": [{ "product_id": "SKU-A", "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_order_roundtrip_and_errors() {
    let (app, stores) = setup();
    let vendor = VendorId::new();
    seed_product(&stores, "SKU-A", vendor, 1000);

    let (_, created) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            Uuid::new_v4(),
            serde_json::json!([{ "product_id": "SKU-A", "quantity": 1 }]),
        ),
    )
    .await;
    let order_id = created[0]["id"].as_str().unwrap().to_string();

    let (status, json) = send_get(&app, &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], order_id.as_str());

    let (status, _) = send_get(&app, &format!("/orders/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_get(&app, "/orders/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_transition_names_both_statuses() {
    let (app, stores) = setup();
    let vendor = VendorId::new();
    seed_product(&stores, "SKU-A", vendor, 1000);

    let (_, created) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            Uuid::new_v4(),
            serde_json::json!([{ "product_id": "SKU-A", "quantity": 1 }]),
        ),
    )
    .await;
    let order_id = created[0]["id"].as_str().unwrap().to_string();

    // pending -> ready skips the chain
    let (status, json) = send_json(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        serde_json::json!({
            "status": "ready",
            "vendor_id": vendor.as_uuid().to_string()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("pending"), "{message}");
    assert!(message.contains("ready"), "{message}");

    // the order is unchanged
    let (_, fetched) = send_get(&app, &format!("/orders/{order_id}")).await;
    assert_eq!(fetched["status"], "pending");
}

#[tokio::test]
async fn test_foreign_vendor_transition_is_403() {
    let (app, stores) = setup();
    seed_product(&stores, "SKU-A", VendorId::new(), 1000);

    let (_, created) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            Uuid::new_v4(),
            serde_json::json!([{ "product_id": "SKU-A", "quantity": 1 }]),
        ),
    )
    .await;
    let order_id = created[0]["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        serde_json::json!({
            "status": "confirmed",
            "vendor_id": Uuid::new_v4().to_string()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_full_lifecycle_sets_delivery_timestamp() {
    let (app, stores) = setup();
    let vendor = VendorId::new();
    seed_product(&stores, "SKU-A", vendor, 1000);

    let (_, created) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            Uuid::new_v4(),
            serde_json::json!([{ "product_id": "SKU-A", "quantity": 1 }]),
        ),
    )
    .await;
    let order_id = created[0]["id"].as_str().unwrap().to_string();

    for (step, expect_delivery) in [
        ("confirmed", false),
        ("preparing", false),
        ("ready", false),
        ("delivering", false),
        ("delivered", true),
    ] {
        let (status, json) = send_json(
            &app,
            "PUT",
            &format!("/orders/{order_id}/status"),
            serde_json::json!({
                "status": step,
                "vendor_id": vendor.as_uuid().to_string()
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "transition to {step}");
        assert_eq!(json["status"], step);
        assert_eq!(json["actual_delivery_time"].is_string(), expect_delivery);
    }
}

#[tokio::test]
async fn test_payment_update() {
    let (app, stores) = setup();
    let vendor = VendorId::new();
    let patron = Uuid::new_v4();
    seed_product(&stores, "SKU-A", vendor, 1000);

    let (_, created) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            patron,
            serde_json::json!([{ "product_id": "SKU-A", "quantity": 1 }]),
        ),
    )
    .await;
    let order_id = created[0]["id"].as_str().unwrap().to_string();

    let (status, json) = send_json(
        &app,
        "PUT",
        &format!("/orders/{order_id}/payment"),
        serde_json::json!({
            "payment_status": "paid",
            "patron_id": patron.to_string()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["payment_status"], "paid");

    // a stranger gets a 403
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/orders/{order_id}/payment"),
        serde_json::json!({
            "payment_status": "refunded",
            "patron_id": Uuid::new_v4().to_string()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_artisan_revenue_summary() {
    let (app, stores) = setup();
    let vendor = VendorId::new();
    seed_product(&stores, "SKU-A", vendor, 10000);

    let (_, created) = send_json(
        &app,
        "POST",
        "/orders",
        checkout_body(
            Uuid::new_v4(),
            serde_json::json!([{ "product_id": "SKU-A", "quantity": 1 }]),
        ),
    )
    .await;
    let order_id = created[0]["id"].as_str().unwrap().to_string();

    for step in ["confirmed", "preparing", "ready", "delivering", "delivered"] {
        send_json(
            &app,
            "PUT",
            &format!("/orders/{order_id}/status"),
            serde_json::json!({
                "status": step,
                "vendor_id": vendor.as_uuid().to_string()
            }),
        )
        .await;
    }

    let (status, json) = send_get(
        &app,
        &format!(
            "/revenue/artisan/summary?vendor_id={}&period=week",
            vendor.as_uuid()
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["order_count"], 1);
    assert_eq!(json["total_gross_cents"], 10000);
    assert_eq!(json["total_commission_cents"], 1000);
    assert_eq!(json["total_earnings_cents"], 9000);
    assert_eq!(json["net_earnings_cents"], 9000);

    let (status, _) = send_get(
        &app,
        &format!(
            "/revenue/artisan/summary?vendor_id={}&period=decade",
            vendor.as_uuid()
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn seed_live_promotion(
    stores: &api::DefaultStores,
    vendor_id: VendorId,
    sku: &str,
    feature_type: FeatureType,
) {
    let now = Utc::now();
    let mut promo = PromotionalFeature::purchase(
        vendor_id,
        ProductId::new(sku),
        feature_type,
        now - Duration::days(1),
        now + Duration::days(6),
        Money::from_dollars(10),
        Specifications {
            keywords: vec!["mug".into()],
            ..Specifications::default()
        },
        now - Duration::days(1),
    )
    .unwrap();
    promo.review(true, now).unwrap();
    promo.activate(now).unwrap();
    stores.promotions.insert(promo);
}

#[tokio::test]
async fn test_featured_placements() {
    let (app, stores) = setup();
    let near = VendorId::new();
    let far = VendorId::new();
    seed_product(&stores, "SKU-NEAR", near, 1000);
    seed_product(&stores, "SKU-FAR", far, 1000);
    stores.vendors.insert(Vendor {
        id: near,
        shop_name: "Near Shop".into(),
        location: Some(Coordinates::new(1.0, 1.0)),
    });
    stores.vendors.insert(Vendor {
        id: far,
        shop_name: "Far Shop".into(),
        location: Some(Coordinates::new(60.0, 60.0)),
    });
    seed_live_promotion(&stores, far, "SKU-FAR", FeatureType::FeaturedProduct);
    seed_live_promotion(&stores, near, "SKU-NEAR", FeatureType::FeaturedProduct);

    let (status, json) = send_get(
        &app,
        "/promotional/products/featured?limit=5&user_lat=0.0&user_lng=0.0",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let placements = json.as_array().unwrap();
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0]["product_id"], "SKU-NEAR");
    assert_eq!(placements[1]["product_id"], "SKU-FAR");
}

#[tokio::test]
async fn test_sponsored_placements_with_search() {
    let (app, stores) = setup();
    let vendor = VendorId::new();
    seed_product(&stores, "SKU-A", vendor, 1000);
    seed_live_promotion(&stores, vendor, "SKU-A", FeatureType::SponsoredProduct);

    let (status, json) = send_get(
        &app,
        "/promotional/products/sponsored?limit=5&category=pottery&search_query=mug",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let placements = json.as_array().unwrap();
    assert_eq!(placements.len(), 1);
    // base 100 + category 50 + keyword 25
    assert_eq!(placements[0]["relevance_score"], 175.0);
    assert!(placements[0]["remaining_days"].as_i64().unwrap() >= 6);
}

#[tokio::test]
async fn test_empty_pools_return_empty_lists() {
    let (app, _) = setup();

    let (status, json) = send_get(&app, "/promotional/products/featured").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());

    let (status, json) = send_get(&app, "/promotional/products/sponsored").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}
