//! Product kind enumeration.

use serde::{Deserialize, Serialize};

/// What a catalog entry delivers.
///
/// Determines fulfillment behavior: kinds with a document component get a
/// personalized (watermarked) copy prepared per buyer, while pure
/// performance data ships as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    /// A printable score document.
    Document,
    /// Machine-readable performance data (MIDI and similar).
    PerformanceData,
    /// A document plus its performance data.
    Bundle,
}

impl ProductKind {
    /// Whether fulfillment must prepare a personalized document copy.
    #[must_use]
    pub const fn has_document_component(self) -> bool {
        matches!(self, Self::Document | Self::Bundle)
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::PerformanceData => write!(f, "performance_data"),
            Self::Bundle => write!(f, "bundle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_component() {
        assert!(ProductKind::Document.has_document_component());
        assert!(ProductKind::Bundle.has_document_component());
        assert!(!ProductKind::PerformanceData.has_document_component());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ProductKind::PerformanceData).expect("serialize");
        assert_eq!(json, "\"PERFORMANCE_DATA\"");
    }
}
