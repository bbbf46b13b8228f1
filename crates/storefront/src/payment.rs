//! Payment collaborator boundary.
//!
//! Payment capture is a deliberate simulation boundary in this design:
//! the bundled gateway resolves successfully after a fixed delay, and no
//! declined-card path is modeled. The trait exists so a real processor
//! can be swapped in without touching the checkout workflow.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use maestro_core::{Email, Price};

/// Errors from the payment collaborator.
///
/// Reserved for future real payment integration; the simulated gateway
/// never produces one.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The charge was declined.
    #[error("payment declined: {0}")]
    Declined(String),
}

/// An external payment processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Capture a charge for `total`, receipted to `contact`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the charge is not captured.
    async fn charge(&self, total: Price, contact: &Email) -> Result<(), PaymentError>;
}

/// The payment stand-in: waits out a fixed processing delay and always
/// captures.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    /// Create a gateway with the given simulated processing delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    #[instrument(skip(self), fields(%total))]
    async fn charge(&self, total: Price, contact: &Email) -> Result<(), PaymentError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(%contact, "payment captured");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_gateway_always_captures() {
        let gateway = SimulatedGateway::new(Duration::from_millis(5));
        let contact = Email::parse("composer@example.com").unwrap();

        let result = gateway
            .charge(Price::from_cents(3500).unwrap(), &contact)
            .await;

        assert!(result.is_ok());
    }
}
