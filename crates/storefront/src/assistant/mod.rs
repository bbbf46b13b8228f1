//! Conversational recommendation assistant.
//!
//! A thin boundary around an external language-model call: the user's
//! message plus a textual catalog context go in, advice text comes out.
//! The boundary degrades gracefully - a missing key or any transport or
//! API failure produces a fixed fallback string instead of an error, so
//! nothing ever propagates into the chat transcript.

mod client;
mod error;
mod types;

pub use client::AssistantClient;
pub use error::AssistantError;
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message, Usage};

use crate::config::AssistantConfig;
use crate::models::Product;

/// Reply used when no API key is configured.
const OFF_DUTY_REPLY: &str = "The Maestro AI is currently off-duty as the \
environment key is missing. Please check your configuration.";

/// Reply used when the collaborator call fails.
const FALLBACK_REPLY: &str = "I'm having trouble connecting to my musical \
database right now, but I'd love to help you find the right score soon!";

/// System prompt for the music consultant persona.
const CONSULTANT_PROMPT: &str = "You are a professional music consultant for \
a composer's digital store. The store sells sheet music and MIDI. Provide a \
helpful, artistic, and encouraging response under 100 words.";

/// The recommendation assistant service.
pub struct Recommendations {
    client: Option<AssistantClient>,
}

impl Recommendations {
    /// Build the service. Without configuration (or if the client cannot
    /// be built) the assistant stays off-duty and replies with a fixed
    /// string.
    #[must_use]
    pub fn new(config: Option<&AssistantConfig>) -> Self {
        let client = config.and_then(|config| match AssistantClient::new(config) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "assistant client unavailable");
                None
            }
        });

        Self { client }
    }

    /// Whether a collaborator is configured.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Render the catalog as the textual context the consultant sees.
    #[must_use]
    pub fn catalog_context(products: &[Product]) -> String {
        products
            .iter()
            .map(|p| format!("{}: {}", p.title, p.description))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Ask the consultant for advice.
    ///
    /// Always returns displayable text: the collaborator's reply, or a
    /// fixed fallback when the assistant is off-duty or the call fails.
    pub async fn advise(&self, user_message: &str, catalog_context: &str) -> String {
        let Some(client) = &self.client else {
            return OFF_DUTY_REPLY.to_string();
        };

        let system = format!("{CONSULTANT_PROMPT} Context of current catalog: {catalog_context}.");
        let messages = vec![Message::user(user_message)];

        match client.chat(messages, Some(system)).await {
            Ok(advice) => advice,
            Err(e) => {
                tracing::warn!(error = %e, "assistant call failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::ProductDraft;
    use maestro_core::{AssetRef, Price, ProductKind};

    #[test]
    fn test_catalog_context_format() {
        let products = vec![
            Product::new(ProductDraft {
                title: "Nocturne".to_string(),
                description: "A piano piece.".to_string(),
                price: Price::from_cents(1500).unwrap(),
                kind: ProductKind::Document,
                cover_image: "covers/a.jpg".to_string(),
                preview_audio_url: None,
                source_file: AssetRef::new("assets/a.pdf"),
            }),
            Product::new(ProductDraft {
                title: "Waltz".to_string(),
                description: "A chamber piece.".to_string(),
                price: Price::from_cents(2500).unwrap(),
                kind: ProductKind::Bundle,
                cover_image: "covers/b.jpg".to_string(),
                preview_audio_url: None,
                source_file: AssetRef::new("assets/b.pdf"),
            }),
        ];

        assert_eq!(
            Recommendations::catalog_context(&products),
            "Nocturne: A piano piece. | Waltz: A chamber piece."
        );
    }

    #[tokio::test]
    async fn test_off_duty_without_key() {
        let assistant = Recommendations::new(None);
        assert!(!assistant.is_available());

        let reply = assistant.advise("Suggest a moody piano piece.", "").await;
        assert_eq!(reply, OFF_DUTY_REPLY);
    }
}
