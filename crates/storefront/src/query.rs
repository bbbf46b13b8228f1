//! Catalog query engine.
//!
//! A pure derived view over the catalog: no indexing, no caching,
//! recomputed whenever any input changes. Catalog sizes here are tens to
//! low hundreds of items, so a linear scan is the whole engine.

use maestro_core::ProductKind;

use crate::models::Product;

/// Which product kinds the browsing view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// Show every kind.
    #[default]
    All,
    /// Show only one kind.
    Only(ProductKind),
}

impl KindFilter {
    fn matches(self, kind: ProductKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => kind == wanted,
        }
    }
}

/// The subsequence of `products` visible under a free-text query and a
/// kind filter.
///
/// Matching is a case-insensitive substring test against title and
/// description - not tokenized, not fuzzy. An empty (or all-whitespace)
/// query matches everything.
#[must_use]
pub fn visible_products<'a>(
    products: &'a [Product],
    search: &str,
    filter: KindFilter,
) -> Vec<&'a Product> {
    let query = search.trim().to_lowercase();

    products
        .iter()
        .filter(|p| filter.matches(p.kind))
        .filter(|p| {
            query.is_empty()
                || p.title.to_lowercase().contains(&query)
                || p.description.to_lowercase().contains(&query)
        })
        .collect()
}
