//! Product domain types.

use serde::{Deserialize, Serialize};

use maestro_core::{AssetRef, Price, ProductId, ProductKind};

/// Rating assigned to a newly registered product.
const INITIAL_RATING: f32 = 5.0;

/// A sellable catalog entry.
///
/// Products are immutable once created: catalog management may add or
/// remove entries but never edits one in place, so a [`PurchaseRecord`]
/// snapshot stays truthful even after the catalog changes.
///
/// [`PurchaseRecord`]: super::PurchaseRecord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog ID, assigned at creation.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Sale price.
    pub price: Price,
    /// What this entry delivers.
    pub kind: ProductKind,
    /// Reference to the display art.
    pub cover_image: String,
    /// Reference to a preview audio asset, if one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_audio_url: Option<String>,
    /// The deliverable to personalize at fulfillment time. Empty for
    /// kinds with no document component.
    pub source_file: AssetRef,
    /// Display-only aggregate rating; not recomputed here.
    pub rating: f32,
    /// Display-only review count; not recomputed here.
    pub reviews_count: u32,
}

impl Product {
    /// Register a new product from a draft.
    ///
    /// Assigns a fresh ID and the initial display aggregates (rating 5.0,
    /// zero reviews).
    #[must_use]
    pub fn new(draft: ProductDraft) -> Self {
        Self {
            id: ProductId::new(),
            title: draft.title,
            description: draft.description,
            price: draft.price,
            kind: draft.kind,
            cover_image: draft.cover_image,
            preview_audio_url: draft.preview_audio_url,
            source_file: draft.source_file,
            rating: INITIAL_RATING,
            reviews_count: 0,
        }
    }
}

/// The fields an administrator supplies when registering a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub kind: ProductKind,
    pub cover_image: String,
    pub preview_audio_url: Option<String>,
    pub source_file: AssetRef,
}
