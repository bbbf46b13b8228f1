//! Watermarking collaborator boundary.
//!
//! Personalizes a deliverable document with the buyer's identity. The
//! bundled implementation simulates the processing delay and echoes the
//! source reference back as the delivery; a real service would return a
//! short-lived signed delivery reference.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use maestro_core::{AssetRef, Email};

/// Errors from the watermarking collaborator.
#[derive(Debug, thiserror::Error)]
pub enum WatermarkError {
    /// The document could not be personalized.
    #[error("watermarking failed: {0}")]
    Failed(String),
}

/// An external document-personalization service.
#[async_trait]
pub trait Watermarker: Send + Sync {
    /// Embed `recipient` into the document at `source` and return a
    /// reference to the personalized copy.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError` if personalization fails.
    async fn watermark(&self, source: &AssetRef, recipient: &Email)
    -> Result<AssetRef, WatermarkError>;
}

/// The watermarking stand-in: waits out a fixed processing delay and
/// returns the source reference unchanged.
#[derive(Debug, Clone)]
pub struct SimulatedWatermarker {
    delay: Duration,
}

impl SimulatedWatermarker {
    /// Create a watermarker with the given simulated processing delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Watermarker for SimulatedWatermarker {
    #[instrument(skip(self, source))]
    async fn watermark(
        &self,
        source: &AssetRef,
        recipient: &Email,
    ) -> Result<AssetRef, WatermarkError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(%recipient, "document personalized");
        Ok(source.clone())
    }
}
