//! Purchase record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maestro_core::{Email, OrderId, Price};

use super::Product;

/// The immutable receipt of a completed checkout.
///
/// `items` is a value snapshot of the cart at checkout time, with line
/// quantities flattened into repeated entries. Later catalog edits cannot
/// retroactively alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Fresh, unique order reference.
    pub order_id: OrderId,
    /// Contact email used for personalization and the receipt.
    pub email: Email,
    /// Snapshot of the purchased products.
    pub items: Vec<Product>,
    /// When the checkout completed.
    pub placed_at: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Sum of the snapshot item prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }
}
