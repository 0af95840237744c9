//! Cart splitter: groups a mixed-vendor cart into per-vendor draft orders.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{ProductId, VendorId};
use serde::{Deserialize, Serialize};

use crate::product::Product;

use super::model::{DraftOrder, LineItem};
use super::OrderError;

/// A product reference plus quantity, as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Splits a cart into one draft order per vendor.
///
/// `lookup` resolves product references against an already-fetched catalog
/// snapshot; the function itself performs no I/O. Line items snapshot the
/// product price at split time.
///
/// Items keep their cart order within each vendor group, and groups are
/// emitted in order of each vendor's first appearance in the cart, so the
/// result is deterministic for a given input.
pub fn split_cart<F>(
    cart: &[CartItem],
    lookup: F,
    now: DateTime<Utc>,
) -> Result<Vec<DraftOrder>, OrderError>
where
    F: Fn(&ProductId) -> Option<Product>,
{
    let mut drafts: Vec<DraftOrder> = Vec::new();
    let mut group_index: HashMap<VendorId, usize> = HashMap::new();

    for item in cart {
        if item.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: item.quantity,
            });
        }

        let product = lookup(&item.product_id).ok_or_else(|| OrderError::ProductNotFound {
            product_id: item.product_id.clone(),
        })?;
        let vendor_id = product.vendor_id.ok_or_else(|| OrderError::MissingVendor {
            product_id: item.product_id.clone(),
        })?;

        let slot = *group_index.entry(vendor_id).or_insert_with(|| {
            drafts.push(DraftOrder::new(vendor_id));
            drafts.len() - 1
        });
        drafts[slot].push(LineItem::from_product(&product, item.quantity, now));
    }

    Ok(drafts)
}
