//! Asset reference type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque reference to a deliverable asset.
///
/// Points at either a stored source file (to be personalized at
/// fulfillment time) or a prepared delivery. Kinds with no document
/// component carry an empty reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Create an asset reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// An empty reference (nothing to deliver or personalize).
    #[must_use]
    pub const fn none() -> Self {
        Self(String::new())
    }

    /// Whether the reference points at anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_owned())
    }
}
