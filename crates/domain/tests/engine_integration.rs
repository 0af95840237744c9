//! Integration tests for the engine: a full checkout computed end to end
//! through the splitter, the state machine, the commission calculator, and
//! the revenue summary.

use chrono::{Duration, TimeZone, Utc};
use common::{PatronId, ProductId, VendorId};
use domain::{
    Buyer, CartItem, DEFAULT_COMMISSION_RATE, FeatureType, Money, Order, OrderStatus, Period,
    Product, ProductKind, PromotionalFeature, Specifications, compute_order_revenue, split_cart,
    summarize_platform_revenue, summarize_vendor_revenue,
};

fn product(sku: &str, vendor_id: VendorId, cents: i64) -> Product {
    Product {
        id: ProductId::new(sku),
        vendor_id: Some(vendor_id),
        name: format!("Product {sku}"),
        price: Money::from_cents(cents),
        category: None,
        is_active: true,
        kind: ProductKind::ReadyToShip { stock: 10 },
    }
}

#[test]
fn multi_vendor_checkout_to_delivery_and_summary() {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
    let vendor_a = VendorId::new();
    let vendor_b = VendorId::new();
    let catalog = vec![
        product("SKU-A", vendor_a, 1000),
        product("SKU-B", vendor_b, 500),
    ];
    let lookup = |id: &ProductId| catalog.iter().find(|p| &p.id == id).cloned();

    // cart: 2 x $10 from vendor A, 1 x $5 from vendor B
    let cart = [
        CartItem {
            product_id: ProductId::new("SKU-A"),
            quantity: 2,
        },
        CartItem {
            product_id: ProductId::new("SKU-B"),
            quantity: 1,
        },
    ];

    let drafts = split_cart(&cart, lookup, now).unwrap();
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].total_amount, Money::from_dollars(20));
    assert_eq!(drafts[1].total_amount, Money::from_dollars(5));

    let buyer = Buyer::Patron(PatronId::new());
    let mut orders: Vec<Order> = drafts
        .into_iter()
        .map(|draft| {
            let mut order = Order::from_draft(draft, buyer.clone(), Some("card".into()), now);
            order.revenue = Some(
                compute_order_revenue(order.total_amount, DEFAULT_COMMISSION_RATE).unwrap(),
            );
            order
        })
        .collect();

    // drive vendor A's order to delivered
    let vendor_a_order = &mut orders[0];
    for (step, status) in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ]
    .into_iter()
    .enumerate()
    {
        let at = now + Duration::hours(step as i64 + 1);
        let change = vendor_a_order.transition(status, vendor_a, at).unwrap();
        assert_eq!(change.to, status);
    }
    assert!(vendor_a_order.actual_delivery_time.is_some());
    assert_eq!(
        vendor_a_order.ready_to_ship_status,
        Some(OrderStatus::Delivered)
    );

    // vendor B cancels
    orders[1]
        .transition(OrderStatus::Cancelled, vendor_b, now + Duration::hours(1))
        .unwrap();

    // only vendor A's delivered order contributes to revenue
    let report_time = now + Duration::days(1);
    let summary = summarize_vendor_revenue(vendor_a, Period::Week, report_time, &orders, &[]);
    assert_eq!(summary.order_count, 1);
    assert_eq!(summary.total_gross, Money::from_dollars(20));
    assert_eq!(summary.total_commission, Money::from_cents(200));
    assert_eq!(summary.total_earnings, Money::from_cents(1800));

    let platform = summarize_platform_revenue(Period::Week, report_time, &orders, &[]);
    assert_eq!(platform.order_count, 1);
    assert_eq!(platform.total_gross, Money::from_dollars(20));
}

#[test]
fn promotional_spend_reduces_net_earnings_in_summary() {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
    let vendor = VendorId::new();
    let catalog = vec![product("SKU-A", vendor, 20000)];
    let lookup = |id: &ProductId| catalog.iter().find(|p| &p.id == id).cloned();

    let drafts = split_cart(
        &[CartItem {
            product_id: ProductId::new("SKU-A"),
            quantity: 1,
        }],
        lookup,
        now,
    )
    .unwrap();

    let mut order = Order::from_draft(
        drafts.into_iter().next().unwrap(),
        Buyer::Patron(PatronId::new()),
        None,
        now,
    );
    order.revenue =
        Some(compute_order_revenue(order.total_amount, DEFAULT_COMMISSION_RATE).unwrap());
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ] {
        order.transition(status, vendor, now + Duration::hours(1)).unwrap();
    }

    let promotion = PromotionalFeature::purchase(
        vendor,
        ProductId::new("SKU-A"),
        FeatureType::SponsoredProduct,
        now,
        now + Duration::days(14),
        Money::from_dollars(30),
        Specifications::default(),
        now,
    )
    .unwrap();

    let summary = summarize_vendor_revenue(
        vendor,
        Period::Week,
        now + Duration::days(1),
        &[order],
        &[promotion],
    );
    // earnings $180 minus $30 promotional spend
    assert_eq!(summary.total_earnings, Money::from_dollars(180));
    assert_eq!(summary.promotional_spend, Money::from_dollars(30));
    assert_eq!(summary.net_earnings, Money::from_dollars(150));
}

#[test]
fn commission_recompute_overwrites_rather_than_accumulates() {
    let gross = Money::from_dollars(100);
    let first = compute_order_revenue(gross, DEFAULT_COMMISSION_RATE).unwrap();

    // a corrective recompute after an amount fix
    let corrected = compute_order_revenue(Money::from_dollars(90), DEFAULT_COMMISSION_RATE).unwrap();
    assert_eq!(corrected.gross_amount, Money::from_dollars(90));
    assert_eq!(corrected.platform_commission, Money::from_dollars(9));
    assert_eq!(corrected.artisan_earnings, Money::from_dollars(81));

    // re-running on the original amount reproduces the original breakdown
    let again = compute_order_revenue(gross, DEFAULT_COMMISSION_RATE).unwrap();
    assert_eq!(again, first);
}
