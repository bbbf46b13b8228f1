//! Unified error handling for storefront operations.
//!
//! Component modules define their own error enums; [`StoreError`] is the
//! aggregate the application container surfaces from its orchestration
//! methods. No error here is fatal: every failure path leaves the system
//! in a well-defined prior state (the form stays open, the cart stays
//! intact, administration stays locked).

use thiserror::Error;

use crate::accounts::AuthError;
use crate::checkout::CheckoutError;
use crate::session::SessionError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Registration or authentication failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// A checkout attempt failed or was rejected.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A session gate rejected the operation.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Persisting a store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The referenced product is not in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(maestro_core::ProductId),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
