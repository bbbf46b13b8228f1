//! The application container.
//!
//! [`Storefront`] owns every state container explicitly - catalog,
//! account roster, cart, session, checkout machine - plus the external
//! collaborators, and exposes the state-transition operations a front
//! end drives. It is built once at process start and flushed at
//! shutdown; nothing here is an ambient global.

use std::sync::Arc;

use maestro_core::ProductId;

use crate::accounts::{AccountStore, AuthError};
use crate::assistant::Recommendations;
use crate::cart::Cart;
use crate::catalog::CatalogStore;
use crate::checkout::Checkout;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::fulfillment::FulfillmentTracker;
use crate::models::{Account, Product, ProductDraft, PurchaseRecord};
use crate::payment::{PaymentGateway, SimulatedGateway};
use crate::query::{KindFilter, visible_products};
use crate::session::{Identity, Session};
use crate::storage::StorageError;
use crate::watermark::{SimulatedWatermarker, Watermarker};

/// The storefront application state.
pub struct Storefront {
    catalog: CatalogStore,
    accounts: AccountStore,
    cart: Cart,
    session: Session,
    checkout: Checkout,
    gateway: Arc<dyn PaymentGateway>,
    watermarker: Arc<dyn Watermarker>,
    recommendations: Recommendations,
}

impl Storefront {
    /// Build the storefront with the bundled simulated collaborators.
    ///
    /// Rehydrates both stores from the configured data directory (or
    /// seeds them) and starts an anonymous session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` if seeding the account roster fails.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let gateway = Arc::new(SimulatedGateway::new(config.payment_delay));
        let watermarker = Arc::new(SimulatedWatermarker::new(config.watermark_delay));
        Self::with_collaborators(config, gateway, watermarker)
    }

    /// Build the storefront with explicit collaborator implementations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` if seeding the account roster fails.
    pub fn with_collaborators(
        config: StoreConfig,
        gateway: Arc<dyn PaymentGateway>,
        watermarker: Arc<dyn Watermarker>,
    ) -> Result<Self> {
        let catalog = CatalogStore::open(&config.data_dir);
        let accounts = AccountStore::open(&config.data_dir)?;
        let recommendations = Recommendations::new(config.assistant.as_ref());
        let session = Session::new(config.admin_code);

        tracing::info!(
            products = catalog.all().len(),
            accounts = accounts.all().len(),
            "storefront ready"
        );

        Ok(Self {
            catalog,
            accounts,
            cart: Cart::new(),
            session,
            checkout: Checkout::new(),
            gateway,
            watermarker,
            recommendations,
        })
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// The catalog subsequence visible under a query and kind filter.
    #[must_use]
    pub fn browse(&self, search: &str, filter: KindFilter) -> Vec<&Product> {
        visible_products(self.catalog.all(), search, filter)
    }

    /// The full catalog store (read-only).
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The cart (read-only).
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session state for view/prompt transitions.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The checkout machine (read-only).
    #[must_use]
    pub const fn checkout_state(&self) -> &Checkout {
        &self.checkout
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a catalog entry to the cart as a fresh quantity-1 line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownProduct` if the id is not in the
    /// catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<()> {
        let product = self
            .catalog
            .get(id)
            .ok_or(StoreError::UnknownProduct(id))?
            .clone();
        self.cart.add(product);
        Ok(())
    }

    /// Remove every cart line for a product id.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove(id);
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Register a new customer and sign them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs,
    /// plus everything [`AccountStore::register`] can reject.
    pub fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Account> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }

        let account = self.accounts.register(name, email, password)?;
        self.session
            .sign_in_as(account.id, account.name.clone(), account.email.clone());
        Ok(account)
    }

    /// Sign in a returning customer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<Account> {
        let account = self.accounts.authenticate(email, password)?;
        self.session
            .sign_in_as(account.id, account.name.clone(), account.email.clone());
        Ok(account)
    }

    /// Sign out: anonymous identity, relocked administration, store view,
    /// and an emptied cart.
    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.cart.clear();
    }

    /// Record a password-reset request (starts the confirmation window).
    pub fn request_password_reset(&mut self) {
        self.session.request_password_reset();
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Try to unlock the administration screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AdminCodeMismatch` on a wrong code.
    pub fn unlock_admin(&mut self, code: &str) -> Result<()> {
        self.session.unlock_admin(code)?;
        Ok(())
    }

    /// Register a new product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AdminLocked` unless administration is
    /// unlocked, and `StorageError` if persisting fails.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<Product> {
        self.session.require_admin()?;

        let product = Product::new(draft);
        self.catalog.add(product.clone())?;
        Ok(product)
    }

    /// Remove a product from the catalog. A no-op if absent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AdminLocked` unless administration is
    /// unlocked, and `StorageError` if persisting fails.
    pub fn remove_product(&mut self, id: ProductId) -> Result<()> {
        self.session.require_admin()?;
        self.catalog.remove(id)?;
        Ok(())
    }

    /// The customer roster, filtered by a name/email substring.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AdminLocked` unless administration is
    /// unlocked.
    pub fn customers(&self, query: &str) -> Result<Vec<&Account>> {
        self.session.require_admin()?;
        Ok(self.accounts.search(query))
    }

    // =========================================================================
    // Checkout & Fulfillment
    // =========================================================================

    /// Run a checkout attempt for the current cart.
    ///
    /// On success: the purchase record snapshot is returned, the
    /// signed-in customer's bookkeeping is updated (guests update
    /// nobody's), the cart is cleared and the view switches to the
    /// download portal. On failure the cart and session are untouched
    /// and the attempt may be retried.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` for precondition and payment failures,
    /// and `StorageError` if recording bookkeeping fails.
    pub async fn checkout(&mut self, contact_email: &str) -> Result<PurchaseRecord> {
        let total = self.cart.total();
        let record = self
            .checkout
            .process(self.gateway.as_ref(), &self.cart, contact_email)
            .await?;

        if let Identity::Customer { email, .. } = self.session.identity() {
            let email = email.clone();
            self.accounts.record_purchase(&email, total)?;
        }

        self.cart.clear();
        self.session.show_downloads();
        Ok(record)
    }

    /// Start preparing the personalized downloads for a purchase.
    #[must_use]
    pub fn prepare_downloads(&self, record: &PurchaseRecord) -> FulfillmentTracker {
        FulfillmentTracker::prepare(record, Arc::clone(&self.watermarker))
    }

    // =========================================================================
    // Assistant
    // =========================================================================

    /// Ask the recommendation assistant for advice over the current
    /// catalog. Always returns displayable text.
    pub async fn advise(&self, user_message: &str) -> String {
        let context = Recommendations::catalog_context(self.catalog.all());
        self.recommendations.advise(user_message, &context).await
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Final flush of both durable stores at shutdown.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either write fails.
    pub fn shutdown(self) -> std::result::Result<(), StorageError> {
        self.catalog.flush()?;
        self.accounts.flush()?;
        tracing::info!("storefront flushed and shut down");
        Ok(())
    }
}
