//! Request-scoped orchestration flows.
//!
//! Each flow loads its inputs through the injected collaborators, runs the
//! pure engine functions from the `domain` crate, persists the outcome, and
//! emits observability signals. Collaborators are supplied as trait objects
//! by the composition root; nothing here owns a module-level singleton.

mod error;
mod orders;
mod promotions;
mod revenue;

pub use error::ServiceError;
pub use orders::{CheckoutRequest, OrderFlows};
pub use promotions::PromoPlacements;
pub use revenue::RevenueReports;
