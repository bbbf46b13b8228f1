//! Download-preparation workflow.
//!
//! For a completed purchase, every item's personalized download is
//! prepared concurrently and independently: one item waiting on the
//! watermarking collaborator never blocks another. Per-item progress is
//! keyed by product id - never by position - so a completion that lands
//! after the buyer has navigated away writes into its own tracker and
//! nothing else.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maestro_core::{AssetRef, Email, ProductId, ProductKind};

use crate::models::PurchaseRecord;
use crate::watermark::Watermarker;

/// How many times a watermarking call is tried before the ticket is
/// parked at `Failed`.
const WATERMARK_ATTEMPTS: u32 = 3;

/// One item's fulfillment progress.
///
/// Transitions are strictly ordered per item: `Idle -> Processing ->
/// Ready` for document-bearing kinds, `Idle -> Ready` for pure
/// performance data, with `Failed` terminal after exhausted retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketStatus {
    /// Queued, nothing started.
    #[default]
    Idle,
    /// Waiting on the watermarking collaborator.
    Processing,
    /// The download is available.
    Ready,
    /// Personalization failed after retries.
    Failed,
}

/// Per-item fulfillment state. Ephemeral - never persisted.
#[derive(Debug, Clone, Default)]
pub struct DownloadTicket {
    /// Where this item stands.
    pub status: TicketStatus,
    /// The personalized download, set only once `Ready`.
    pub delivery: Option<AssetRef>,
}

/// Shared progress map for one purchase's downloads.
///
/// Cheaply cloneable; the preparation tasks and the reading front end
/// hold the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct FulfillmentTracker {
    tickets: Arc<Mutex<HashMap<ProductId, DownloadTicket>>>,
}

impl FulfillmentTracker {
    /// Start preparing every item of a purchase.
    ///
    /// One independent task is spawned per unique document-bearing item
    /// (a flattened snapshot may repeat a product; duplicates share one
    /// ticket). Pure performance-data items become `Ready` immediately
    /// and never visit `Processing`.
    #[must_use]
    pub fn prepare(record: &PurchaseRecord, watermarker: Arc<dyn Watermarker>) -> Self {
        let tracker = Self::default();

        for item in &record.items {
            if tracker.ticket(item.id).is_some() {
                continue;
            }

            if item.kind.has_document_component() {
                tracker.set(item.id, TicketStatus::Idle, None);
                tokio::spawn(personalize_item(
                    tracker.clone(),
                    Arc::clone(&watermarker),
                    item.id,
                    item.kind,
                    item.source_file.clone(),
                    record.email.clone(),
                ));
            } else {
                // Nothing to personalize: deliver a placeholder at once.
                let delivery = AssetRef::new(format!("delivery/{}", item.id));
                tracker.set(item.id, TicketStatus::Ready, Some(delivery));
            }
        }

        tracker
    }

    /// One item's current ticket.
    #[must_use]
    pub fn ticket(&self, id: ProductId) -> Option<DownloadTicket> {
        self.lock().get(&id).cloned()
    }

    /// Snapshot of every ticket.
    #[must_use]
    pub fn tickets(&self) -> HashMap<ProductId, DownloadTicket> {
        self.lock().clone()
    }

    /// Whether every ticket has reached `Ready` or `Failed`.
    #[must_use]
    pub fn all_settled(&self) -> bool {
        self.lock()
            .values()
            .all(|t| matches!(t.status, TicketStatus::Ready | TicketStatus::Failed))
    }

    fn set(&self, id: ProductId, status: TicketStatus, delivery: Option<AssetRef>) {
        self.lock().insert(id, DownloadTicket { status, delivery });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ProductId, DownloadTicket>> {
        self.tickets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drive one item through `Processing` to `Ready` (or `Failed`).
async fn personalize_item(
    tracker: FulfillmentTracker,
    watermarker: Arc<dyn Watermarker>,
    id: ProductId,
    kind: ProductKind,
    source: AssetRef,
    recipient: Email,
) {
    tracker.set(id, TicketStatus::Processing, None);
    tracing::debug!(%id, %kind, "preparing personalized download");

    for attempt in 1..=WATERMARK_ATTEMPTS {
        match watermarker.watermark(&source, &recipient).await {
            Ok(delivery) => {
                tracker.set(id, TicketStatus::Ready, Some(delivery));
                tracing::info!(%id, "download ready");
                return;
            }
            Err(e) => {
                tracing::warn!(%id, attempt, error = %e, "watermarking attempt failed");
            }
        }
    }

    tracker.set(id, TicketStatus::Failed, None);
    tracing::warn!(%id, "download preparation failed after retries");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductDraft, PurchaseRecord};
    use crate::watermark::{SimulatedWatermarker, WatermarkError};
    use async_trait::async_trait;
    use chrono::Utc;
    use maestro_core::{Email, OrderId, Price};
    use std::time::Duration;

    fn product(kind: ProductKind) -> Product {
        let source = if kind.has_document_component() {
            AssetRef::new("assets/scores/test.pdf")
        } else {
            AssetRef::none()
        };
        Product::new(ProductDraft {
            title: "Test Score".to_string(),
            description: "Test score.".to_string(),
            price: Price::from_cents(1500).unwrap(),
            kind,
            cover_image: "covers/test.jpg".to_string(),
            preview_audio_url: None,
            source_file: source,
        })
    }

    fn record(items: Vec<Product>) -> PurchaseRecord {
        PurchaseRecord {
            order_id: OrderId::generate(),
            email: Email::parse("composer@example.com").unwrap(),
            items,
            placed_at: Utc::now(),
        }
    }

    async fn settled(tracker: &FulfillmentTracker) {
        for _ in 0..200 {
            if tracker.all_settled() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("tracker never settled");
    }

    #[tokio::test]
    async fn test_performance_data_is_ready_without_processing() {
        let midi = product(ProductKind::PerformanceData);
        let id = midi.id;

        // A long watermark delay would be observable if this item ever
        // went through the collaborator.
        let watermarker = Arc::new(SimulatedWatermarker::new(Duration::from_secs(30)));
        let tracker = FulfillmentTracker::prepare(&record(vec![midi]), watermarker);

        let ticket = tracker.ticket(id).unwrap();
        assert_eq!(ticket.status, TicketStatus::Ready);
        assert!(ticket.delivery.is_some());
    }

    #[tokio::test]
    async fn test_document_visits_processing_then_ready() {
        let doc = product(ProductKind::Document);
        let id = doc.id;

        let watermarker = Arc::new(SimulatedWatermarker::new(Duration::from_millis(50)));
        let tracker = FulfillmentTracker::prepare(&record(vec![doc]), watermarker);

        // While the collaborator sleeps the ticket must be Processing.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(tracker.ticket(id).unwrap().status, TicketStatus::Processing);

        settled(&tracker).await;
        let ticket = tracker.ticket(id).unwrap();
        assert_eq!(ticket.status, TicketStatus::Ready);
        assert_eq!(
            ticket.delivery,
            Some(AssetRef::new("assets/scores/test.pdf"))
        );
    }

    #[tokio::test]
    async fn test_items_settle_independently() {
        let midi = product(ProductKind::PerformanceData);
        let doc = product(ProductKind::Document);
        let (midi_id, doc_id) = (midi.id, doc.id);

        let watermarker = Arc::new(SimulatedWatermarker::new(Duration::from_millis(40)));
        let tracker = FulfillmentTracker::prepare(&record(vec![doc, midi]), watermarker);

        // The MIDI ticket is already Ready while the document is not.
        assert_eq!(tracker.ticket(midi_id).unwrap().status, TicketStatus::Ready);
        assert_ne!(tracker.ticket(doc_id).unwrap().status, TicketStatus::Ready);

        settled(&tracker).await;
        assert_eq!(tracker.ticket(doc_id).unwrap().status, TicketStatus::Ready);
    }

    #[tokio::test]
    async fn test_duplicate_snapshot_entries_share_one_ticket() {
        let doc = product(ProductKind::Document);
        let id = doc.id;

        let watermarker = Arc::new(SimulatedWatermarker::new(Duration::from_millis(5)));
        let tracker =
            FulfillmentTracker::prepare(&record(vec![doc.clone(), doc]), watermarker);

        assert_eq!(tracker.tickets().len(), 1);
        settled(&tracker).await;
        assert_eq!(tracker.ticket(id).unwrap().status, TicketStatus::Ready);
    }

    struct FailingWatermarker;

    #[async_trait]
    impl Watermarker for FailingWatermarker {
        async fn watermark(
            &self,
            _source: &AssetRef,
            _recipient: &Email,
        ) -> Result<AssetRef, WatermarkError> {
            Err(WatermarkError::Failed("service unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_exhausted_retries_park_ticket_at_failed() {
        let doc = product(ProductKind::Bundle);
        let id = doc.id;

        let tracker =
            FulfillmentTracker::prepare(&record(vec![doc]), Arc::new(FailingWatermarker));

        settled(&tracker).await;
        let ticket = tracker.ticket(id).unwrap();
        assert_eq!(ticket.status, TicketStatus::Failed);
        assert!(ticket.delivery.is_none());
    }

    #[tokio::test]
    async fn test_late_completion_is_isolated_per_tracker() {
        let doc = product(ProductKind::Document);
        let id = doc.id;

        let slow = Arc::new(SimulatedWatermarker::new(Duration::from_millis(50)));
        let abandoned = FulfillmentTracker::prepare(&record(vec![doc.clone()]), slow);

        // The buyer "navigates away": a fresh tracker for a new record is
        // built while the first one's task is still in flight.
        let fast = Arc::new(SimulatedWatermarker::new(Duration::from_millis(5)));
        let current = FulfillmentTracker::prepare(&record(vec![doc]), fast);

        settled(&current).await;
        settled(&abandoned).await;

        // The stale completion landed in its own map only.
        assert_eq!(current.ticket(id).unwrap().status, TicketStatus::Ready);
        assert_eq!(abandoned.ticket(id).unwrap().status, TicketStatus::Ready);
        assert_eq!(current.tickets().len(), 1);
    }
}
