//! Domain types for the storefront.
//!
//! These are validated domain objects, separate from the wire/storage
//! representation only in that the stores own their serialization.

pub mod account;
pub mod order;
pub mod product;

pub use account::Account;
pub use order::PurchaseRecord;
pub use product::{Product, ProductDraft};
