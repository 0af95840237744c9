//! Core engine for the marketplace: order splitting, the order status state
//! machine, commission/revenue allocation, and promotional placement ranking.
//!
//! Everything in this crate is a pure, synchronous computation over its
//! inputs. All I/O (product lookup, order persistence, promotion queries)
//! lives behind the collaborator traits in the `store` crate and is wired in
//! by the service layer; engine functions that need the current time take it
//! as an explicit argument.

pub mod money;
pub mod order;
pub mod product;
pub mod promo;
pub mod revenue;

pub use money::Money;
pub use order::{
    Actor, Buyer, CartItem, DraftOrder, GuestInfo, LineItem, Order, OrderError, OrderStatus,
    PaymentStatus, StatusChange, split_cart,
};
pub use product::{LeadTimeUnit, Product, ProductKind, ProductType, Vendor};
pub use promo::{
    Candidate, FeatureType, Performance, PromoError, PromotionStatus, PromotionalFeature,
    RankedPlacement, Specifications, ViewerContext, rank_featured, rank_sponsored,
};
pub use revenue::{
    DEFAULT_COMMISSION_RATE, Period, RevenueBreakdown, RevenueError, RevenueSummary,
    compute_order_revenue, summarize_platform_revenue, summarize_vendor_revenue,
};
