//! Collaborator interfaces consumed by the marketplace engine's service
//! layer, plus in-memory implementations.
//!
//! The engine itself (the `domain` crate) is pure and synchronous; all I/O
//! goes through the async traits defined here. The in-memory variants back
//! the tests and the default composition root, and the [`OrderStore`]
//! contract carries the optimistic-concurrency semantics a database-backed
//! implementation must honor.

mod error;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use memory::{
    InMemoryNotificationSink, InMemoryOrderStore, InMemoryProductCatalog, InMemoryPromotionPool,
    InMemoryVendorDirectory,
};
pub use traits::{NotificationSink, OrderStore, ProductLookup, PromotionPool, VendorDirectory};
