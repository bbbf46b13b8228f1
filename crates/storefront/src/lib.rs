//! Maestro Storefront - catalog, cart, checkout and fulfillment core.
//!
//! This crate implements the state machine behind a digital sheet-music
//! store: a persistent catalog and customer roster, an in-memory cart,
//! session/identity tracking with an admin gate, a checkout workflow
//! against a (simulated) payment collaborator, and a per-item download
//! preparation workflow against a (simulated) watermarking collaborator.
//!
//! # Architecture
//!
//! There is no HTTP or CLI surface here: a surrounding interactive front
//! end (or a test harness) constructs a [`Storefront`] and drives its
//! state-transition operations directly.
//!
//! - [`catalog`] / [`accounts`] - process-wide stores, rehydrated from
//!   durable storage at startup and rewritten wholesale on every mutation
//! - [`cart`] / [`session`] - per-process state, never persisted
//! - [`checkout`] / [`fulfillment`] - the two asynchronous workflows
//! - [`assistant`] - the conversational recommendation collaborator
//!
//! # Collaborators
//!
//! Payment capture and document watermarking are deliberate simulation
//! boundaries: the bundled implementations resolve after a configured
//! delay. Both sit behind traits so a real integration can be swapped in
//! without touching the workflows.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accounts;
pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fulfillment;
pub mod models;
pub mod payment;
pub mod query;
pub mod session;
pub mod state;
pub mod storage;
pub mod watermark;

pub use accounts::{AccountStore, AuthError};
pub use assistant::{AssistantClient, AssistantError, Recommendations};
pub use cart::{Cart, CartLine};
pub use catalog::CatalogStore;
pub use checkout::{Checkout, CheckoutError, CheckoutState};
pub use config::{AssistantConfig, ConfigError, StoreConfig};
pub use error::StoreError;
pub use fulfillment::{DownloadTicket, FulfillmentTracker, TicketStatus};
pub use models::{Account, Product, ProductDraft, PurchaseRecord};
pub use payment::{PaymentError, PaymentGateway, SimulatedGateway};
pub use query::{KindFilter, visible_products};
pub use session::{AdminAccess, AuthPrompt, Identity, Session, SessionError, View};
pub use state::Storefront;
pub use storage::{JsonStore, StorageError};
pub use watermark::{SimulatedWatermarker, WatermarkError, Watermarker};
