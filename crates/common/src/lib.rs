//! Shared types for the marketplace engine.

mod types;

pub use types::{Coordinates, OrderId, PatronId, ProductId, PromotionId, VendorId};
