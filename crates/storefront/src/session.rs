//! Session and identity state.
//!
//! Tracks whether the visitor is anonymous or a signed-in customer, and
//! orthogonally whether the administration screen is unlocked. State
//! lives only for the process lifetime; there is no session expiry.
//!
//! Transient feedback (the admin-code error shake, the password-reset
//! confirmation) is deadline-based: a flag reads as raised only inside
//! its display window, so a late poll after the window is an automatic
//! no-op and no timer task is needed.

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};

use maestro_core::{AccountId, Email};

/// How long the admin-code error stays visible.
pub const ADMIN_ERROR_WINDOW: Duration = Duration::from_secs(2);

/// How long the password-reset confirmation stays visible before the
/// prompt returns to sign-in.
pub const RESET_CONFIRMATION_WINDOW: Duration = Duration::from_secs(4);

/// Errors surfaced by session transitions and gates.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The supplied admin code is wrong.
    #[error("admin code mismatch")]
    AdminCodeMismatch,

    /// The operation requires an unlocked administration session.
    #[error("administration is locked")]
    AdminLocked,

    /// The operation requires a signed-in customer.
    #[error("not signed in")]
    NotSignedIn,
}

/// Who the visitor is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// A guest; browsing and checkout are available, bookkeeping is not.
    #[default]
    Anonymous,
    /// A signed-in customer.
    Customer {
        /// The signed-in account.
        account_id: AccountId,
        /// Display name.
        name: String,
        /// The account's email, used for purchase bookkeeping.
        email: Email,
    },
}

/// Whether the administration screen is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminAccess {
    #[default]
    Locked,
    Unlocked,
}

/// Which screen the front end is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The browsing storefront.
    #[default]
    Store,
    /// The administration screen (catalog + customer roster).
    Admin,
    /// The post-purchase download portal.
    Downloads,
}

/// Which authentication form is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPrompt {
    SignIn,
    SignUp,
    ForgotPassword,
}

/// A flag that reads as raised only inside a display window.
#[derive(Debug, Clone, Copy, Default)]
struct TransientFlag {
    raised_until: Option<Instant>,
}

impl TransientFlag {
    fn raise(&mut self, window: Duration) {
        self.raised_until = Some(Instant::now() + window);
    }

    fn is_raised(&self) -> bool {
        self.raised_until.is_some_and(|until| Instant::now() < until)
    }

    /// Whether the flag was raised and its window has passed.
    fn has_expired(&self) -> bool {
        self.raised_until.is_some_and(|until| Instant::now() >= until)
    }

    fn clear(&mut self) {
        self.raised_until = None;
    }
}

/// Per-process session state.
pub struct Session {
    identity: Identity,
    admin: AdminAccess,
    view: View,
    prompt: Option<AuthPrompt>,
    admin_error: TransientFlag,
    reset_confirmation: TransientFlag,
    admin_code: SecretString,
}

impl Session {
    /// A fresh anonymous session gated by the given admin code.
    #[must_use]
    pub fn new(admin_code: SecretString) -> Self {
        Self {
            identity: Identity::Anonymous,
            admin: AdminAccess::Locked,
            view: View::Store,
            prompt: None,
            admin_error: TransientFlag::default(),
            reset_confirmation: TransientFlag::default(),
            admin_code,
        }
    }

    /// Current visitor identity.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The signed-in customer's email, if any.
    #[must_use]
    pub fn customer_email(&self) -> Option<&Email> {
        match &self.identity {
            Identity::Customer { email, .. } => Some(email),
            Identity::Anonymous => None,
        }
    }

    /// Current admin access.
    #[must_use]
    pub const fn admin_access(&self) -> AdminAccess {
        self.admin
    }

    /// Current active view.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Currently open authentication form, if any.
    #[must_use]
    pub const fn prompt(&self) -> Option<AuthPrompt> {
        self.prompt
    }

    /// Whether the admin-code error is inside its display window.
    #[must_use]
    pub fn admin_error_visible(&self) -> bool {
        self.admin_error.is_raised()
    }

    /// Whether the password-reset confirmation is inside its window.
    #[must_use]
    pub fn reset_confirmation_visible(&self) -> bool {
        self.reset_confirmation.is_raised()
    }

    /// Open an authentication form, clearing any stale feedback.
    pub fn open_prompt(&mut self, prompt: AuthPrompt) {
        self.prompt = Some(prompt);
        self.reset_confirmation.clear();
    }

    /// Dismiss the open authentication form.
    pub fn close_prompt(&mut self) {
        self.prompt = None;
        self.reset_confirmation.clear();
    }

    /// Mark the visitor as a signed-in customer and close the form.
    pub(crate) fn sign_in_as(&mut self, account_id: AccountId, name: String, email: Email) {
        self.identity = Identity::Customer {
            account_id,
            name,
            email,
        };
        self.prompt = None;
    }

    /// Sign out: back to anonymous, administration relocked, store view.
    ///
    /// The owning [`Storefront`](crate::Storefront) also clears the cart.
    pub fn sign_out(&mut self) {
        self.identity = Identity::Anonymous;
        self.admin = AdminAccess::Locked;
        self.view = View::Store;
        self.prompt = None;
    }

    /// Try to unlock the administration screen.
    ///
    /// A correct code unlocks and switches the view to Admin. A wrong
    /// code leaves all state unchanged and raises the transient error
    /// flag for its 2-second window.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AdminCodeMismatch` on a wrong code.
    pub fn unlock_admin(&mut self, code: &str) -> Result<(), SessionError> {
        if code != self.admin_code.expose_secret() {
            tracing::debug!("admin unlock rejected");
            self.admin_error.raise(ADMIN_ERROR_WINDOW);
            return Err(SessionError::AdminCodeMismatch);
        }

        tracing::info!("administration unlocked");
        self.admin = AdminAccess::Unlocked;
        self.admin_error.clear();
        self.view = View::Admin;
        Ok(())
    }

    /// Gate for administration-only operations.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AdminLocked` unless unlocked.
    pub fn require_admin(&self) -> Result<(), SessionError> {
        match self.admin {
            AdminAccess::Unlocked => Ok(()),
            AdminAccess::Locked => Err(SessionError::AdminLocked),
        }
    }

    /// Record that a reset link was "sent" and start the confirmation
    /// display window.
    pub fn request_password_reset(&mut self) {
        self.reset_confirmation.raise(RESET_CONFIRMATION_WINDOW);
    }

    /// Return to the storefront view (admin access is kept).
    pub fn go_home(&mut self) {
        self.view = View::Store;
    }

    /// Switch to the post-purchase download portal.
    pub fn show_downloads(&mut self) {
        self.view = View::Downloads;
    }

    /// Apply deadline-driven transitions.
    ///
    /// The front end calls this once per frame: when the password-reset
    /// confirmation window has passed, the open form returns to sign-in.
    pub fn refresh(&mut self) {
        if self.reset_confirmation.has_expired() {
            self.reset_confirmation.clear();
            if self.prompt == Some(AuthPrompt::ForgotPassword) {
                self.prompt = Some(AuthPrompt::SignIn);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SecretString::from("102030"))
    }

    fn customer(session: &mut Session) {
        session.sign_in_as(
            AccountId::new(),
            "Clara Schumann".to_string(),
            Email::parse("clara@pianist.de").unwrap(),
        );
    }

    #[test]
    fn test_starts_anonymous_and_locked() {
        let session = session();
        assert_eq!(session.identity(), &Identity::Anonymous);
        assert_eq!(session.admin_access(), AdminAccess::Locked);
        assert_eq!(session.view(), View::Store);
        assert!(session.require_admin().is_err());
    }

    #[test]
    fn test_unlock_with_correct_code() {
        let mut session = session();
        session.unlock_admin("102030").unwrap();

        assert_eq!(session.admin_access(), AdminAccess::Unlocked);
        assert_eq!(session.view(), View::Admin);
        assert!(session.require_admin().is_ok());
    }

    #[test]
    fn test_wrong_code_raises_transient_error() {
        let mut session = session();
        let result = session.unlock_admin("000000");

        assert!(matches!(result, Err(SessionError::AdminCodeMismatch)));
        assert_eq!(session.admin_access(), AdminAccess::Locked);
        assert_eq!(session.view(), View::Store);
        assert!(session.admin_error_visible());
    }

    #[test]
    fn test_sign_out_relocks_admin_and_returns_home() {
        let mut session = session();
        customer(&mut session);
        session.unlock_admin("102030").unwrap();

        session.sign_out();

        assert_eq!(session.identity(), &Identity::Anonymous);
        assert_eq!(session.admin_access(), AdminAccess::Locked);
        assert_eq!(session.view(), View::Store);
    }

    #[test]
    fn test_sign_in_closes_prompt() {
        let mut session = session();
        session.open_prompt(AuthPrompt::SignIn);
        customer(&mut session);

        assert_eq!(session.prompt(), None);
        assert!(session.customer_email().is_some());
    }

    #[test]
    fn test_reset_confirmation_window_returns_to_sign_in() {
        let mut session = session();
        session.open_prompt(AuthPrompt::ForgotPassword);
        session.request_password_reset();
        assert!(session.reset_confirmation_visible());

        // Force the window into the past instead of sleeping 4 seconds.
        session.reset_confirmation.raised_until =
            Some(Instant::now() - Duration::from_millis(1));

        session.refresh();
        assert!(!session.reset_confirmation_visible());
        assert_eq!(session.prompt(), Some(AuthPrompt::SignIn));
    }

    #[test]
    fn test_admin_stays_unlocked_when_going_home() {
        let mut session = session();
        session.unlock_admin("102030").unwrap();
        session.go_home();

        assert_eq!(session.view(), View::Store);
        assert!(session.require_admin().is_ok());
    }
}
