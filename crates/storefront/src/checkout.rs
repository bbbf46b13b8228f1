//! Checkout workflow.
//!
//! One state machine per attempt: `Idle -> Processing -> Success` or
//! `Failure`. An attempt is entirely re-entrant: starting a new checkout
//! discards the prior attempt's transient state, and a failed attempt
//! leaves cart and session untouched for retry.

use chrono::Utc;
use tracing::instrument;

use maestro_core::{Email, EmailError, OrderId};

use crate::cart::Cart;
use crate::models::PurchaseRecord;
use crate::payment::{PaymentError, PaymentGateway};

/// Errors that end a checkout attempt.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Checkout requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout requires a contact email for the receipt and
    /// personalization.
    #[error("contact email is missing")]
    MissingContactEmail,

    /// The supplied contact email is malformed.
    #[error("invalid contact email: {0}")]
    InvalidContactEmail(#[from] EmailError),

    /// The payment collaborator declined the charge.
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Where the current attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// No attempt in flight.
    #[default]
    Idle,
    /// Waiting on the payment collaborator.
    Processing,
    /// The last attempt produced a purchase record.
    Success,
    /// The last attempt failed; cart and session are intact.
    Failure,
}

/// The per-attempt checkout machine.
#[derive(Debug, Default)]
pub struct Checkout {
    state: CheckoutState,
}

impl Checkout {
    /// A machine with no attempt in flight.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CheckoutState::Idle,
        }
    }

    /// Where the current attempt stands.
    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// Run one checkout attempt against the payment collaborator.
    ///
    /// On success, returns the immutable purchase record: a value
    /// snapshot of the cart (quantities flattened into repeated
    /// entries) under a fresh order reference. The caller clears the
    /// cart, records bookkeeping and switches the view; this machine
    /// only owns the attempt itself.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` or
    /// `CheckoutError::MissingContactEmail` when a precondition fails
    /// (the attempt never reaches `Processing`), and
    /// `CheckoutError::Payment` if the collaborator declines.
    #[instrument(skip(self, gateway, cart), fields(total = %cart.total()))]
    pub async fn process(
        &mut self,
        gateway: &dyn PaymentGateway,
        cart: &Cart,
        contact_email: &str,
    ) -> Result<PurchaseRecord, CheckoutError> {
        // A new attempt discards whatever the previous one left behind.
        self.state = CheckoutState::Idle;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if contact_email.trim().is_empty() {
            return Err(CheckoutError::MissingContactEmail);
        }
        let email = Email::parse(contact_email.trim())?;

        self.state = CheckoutState::Processing;

        if let Err(e) = gateway.charge(cart.total(), &email).await {
            tracing::warn!(error = %e, "checkout attempt failed");
            self.state = CheckoutState::Failure;
            return Err(e.into());
        }

        let record = PurchaseRecord {
            order_id: OrderId::generate(),
            email,
            items: cart.snapshot_items(),
            placed_at: Utc::now(),
        };

        tracing::info!(
            order_id = %record.order_id,
            items = record.items.len(),
            total = %record.total(),
            "checkout completed"
        );
        self.state = CheckoutState::Success;
        Ok(record)
    }
}
