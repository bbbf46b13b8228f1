//! Catalog store.
//!
//! Owns the list of sellable products. Every mutation rewrites the whole
//! collection to durable storage; startup rehydrates from storage or
//! seeds the built-in default catalog.

use std::path::Path;

use maestro_core::{AssetRef, Price, ProductId, ProductKind};

use crate::models::Product;
use crate::storage::{JsonStore, StorageError};

/// Fixed storage key for the catalog record.
const STORAGE_KEY: &str = "catalog";

/// The catalog of sellable products.
///
/// Newly added products appear at the front of the visible ordering.
#[derive(Debug)]
pub struct CatalogStore {
    products: Vec<Product>,
    storage: JsonStore,
}

impl CatalogStore {
    /// Open the catalog, rehydrating from storage.
    ///
    /// A missing or corrupt record seeds the built-in default catalog and
    /// persists it (best effort - a write failure here only logs).
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        let storage = JsonStore::new(data_dir, STORAGE_KEY);

        let products = storage.load().unwrap_or_else(|| {
            tracing::info!("seeding default catalog");
            let seeded = seed_catalog();
            if let Err(e) = storage.save(&seeded) {
                tracing::warn!(error = %e, "failed to persist seed catalog");
            }
            seeded
        });

        Self { products, storage }
    }

    /// Insert a product at the front of the visible ordering.
    ///
    /// The caller is responsible for id freshness ([`Product::new`]
    /// assigns one); no further dedup check is made.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the collection fails.
    pub fn add(&mut self, product: Product) -> Result<(), StorageError> {
        tracing::info!(id = %product.id, title = %product.title, "product added to catalog");
        self.products.insert(0, product);
        self.storage.save(&self.products)
    }

    /// Delete the entry with the given id. A no-op if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the collection fails.
    pub fn remove(&mut self, id: ProductId) -> Result<(), StorageError> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);

        if self.products.len() == before {
            return Ok(());
        }

        tracing::info!(%id, "product removed from catalog");
        self.storage.save(&self.products)
    }

    /// The current ordered sequence of products.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Rewrite the current collection to storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.storage.save(&self.products)
    }
}

/// The built-in default catalog, used when storage is empty or corrupt.
fn seed_catalog() -> Vec<Product> {
    let price = |cents| Price::from_cents(cents).unwrap_or(Price::ZERO);

    vec![
        Product {
            id: ProductId::new(),
            title: "Nocturne in G Minor".to_string(),
            description: "A melancholic and lyrical solo piano piece exploring dark harmonic colors."
                .to_string(),
            price: price(1500),
            kind: ProductKind::Bundle,
            cover_image: "https://picsum.photos/seed/music1/600/800".to_string(),
            preview_audio_url: Some(
                "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3".to_string(),
            ),
            source_file: AssetRef::new("assets/scores/nocturne-in-g-minor.pdf"),
            rating: 4.8,
            reviews_count: 124,
        },
        Product {
            id: ProductId::new(),
            title: "Symphonic Sketches No. 4".to_string(),
            description:
                "Full orchestral score and MIDI map for the fourth movement of the Sketches series."
                    .to_string(),
            price: price(4500),
            kind: ProductKind::Document,
            cover_image: "https://picsum.photos/seed/music2/600/800".to_string(),
            preview_audio_url: None,
            source_file: AssetRef::new("assets/scores/symphonic-sketches-no-4.pdf"),
            rating: 4.5,
            reviews_count: 42,
        },
        Product {
            id: ProductId::new(),
            title: "Cyberpunk Pulse (MIDI Pack)".to_string(),
            description: "Electronic rhythmic patterns and synthesizer leads in MIDI format."
                .to_string(),
            price: price(2000),
            kind: ProductKind::PerformanceData,
            cover_image: "https://picsum.photos/seed/music3/600/800".to_string(),
            preview_audio_url: None,
            source_file: AssetRef::none(),
            rating: 4.2,
            reviews_count: 89,
        },
        Product {
            id: ProductId::new(),
            title: "Waltz of the Willow".to_string(),
            description: "Elegant chamber ensemble piece for strings and woodwinds.".to_string(),
            price: price(2500),
            kind: ProductKind::Bundle,
            cover_image: "https://picsum.photos/seed/music4/600/800".to_string(),
            preview_audio_url: Some(
                "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3".to_string(),
            ),
            source_file: AssetRef::new("assets/scores/waltz-of-the-willow.pdf"),
            rating: 4.9,
            reviews_count: 56,
        },
    ]
}
