//! The shopping cart.
//!
//! An ordered multiset of catalog items with per-line quantity. Cart
//! state is held only in memory for the session; it is never persisted
//! across restarts.

use maestro_core::{Price, ProductId};

use crate::models::Product;

/// One cart entry: a product snapshot plus a quantity.
///
/// Quantity is always at least 1; removal deletes lines outright rather
/// than zeroing them.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// The product as it was when added.
    pub product: Product,
    /// How many copies this line represents.
    pub quantity: u32,
}

/// The in-progress, unpurchased selection for the current session.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a new quantity-1 line for the product.
    ///
    /// Adding the same product again appends another line rather than
    /// incrementing the existing one: each add is one more visible line.
    pub fn add(&mut self, product: Product) {
        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
    }

    /// Delete every line for the given product id.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum over lines of `price * quantity`. Pure, recomputed on demand.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .map(|line| line.product.price * line.quantity)
            .sum()
    }

    /// Total number of items across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Flatten the cart into repeated product entries, one per item.
    ///
    /// This is the value snapshot a purchase record carries: a line with
    /// quantity 2 contributes two entries.
    #[must_use]
    pub fn snapshot_items(&self) -> Vec<Product> {
        self.lines
            .iter()
            .flat_map(|line| std::iter::repeat_n(line.product.clone(), line.quantity as usize))
            .collect()
    }
}
