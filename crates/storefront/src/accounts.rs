//! Account store and authentication.
//!
//! Owns the registered-customer roster. Passwords are stored as salted
//! Argon2id hashes; authentication verifies against the account's own
//! hash only. Every mutation rewrites the whole roster to durable
//! storage; startup rehydrates from storage or seeds a small built-in
//! roster.

use std::path::Path;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{NaiveDate, Utc};

use maestro_core::{AccountId, Email, EmailError, Price};

use crate::models::Account;
use crate::storage::{JsonStore, StorageError};

/// Fixed storage key for the account roster record.
const STORAGE_KEY: &str = "accounts";

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during registration and authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The email address is already registered.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Email/password combination does not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Sign-up password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The email address is structurally invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password does not meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// Password hashing failed.
    #[error("failed to hash password")]
    Hash,

    /// Persisting the roster failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The roster of registered customers.
///
/// Newly registered accounts appear at the front of the roster.
#[derive(Debug)]
pub struct AccountStore {
    accounts: Vec<Account>,
    storage: JsonStore,
}

impl AccountStore {
    /// Open the roster, rehydrating from storage.
    ///
    /// A missing or corrupt record seeds the built-in roster and persists
    /// it (best effort - a write failure here only logs).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Hash` if hashing a seed password fails.
    pub fn open(data_dir: &Path) -> Result<Self, AuthError> {
        let storage = JsonStore::new(data_dir, STORAGE_KEY);

        let accounts = match storage.load() {
            Some(accounts) => accounts,
            None => {
                tracing::info!("seeding default account roster");
                let seeded = seed_roster()?;
                if let Err(e) = storage.save(&seeded) {
                    tracing::warn!(error = %e, "failed to persist seed roster");
                }
                seeded
            }
        };

        Ok(Self { accounts, storage })
    }

    /// Register a new customer and return the created account.
    ///
    /// Email uniqueness is a case-sensitive exact match. The account
    /// starts with zero spend and purchases, joined today, and is
    /// prepended to the roster.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed,
    /// `AuthError::EmailTaken` if it is already registered,
    /// `AuthError::WeakPassword` if the password is too short, and
    /// `AuthError::Storage` if persisting the roster fails.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = Email::parse(email)?;

        if self.accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::EmailTaken);
        }

        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let account = Account {
            id: AccountId::new(),
            name: name.to_owned(),
            email,
            password_hash,
            joined: Utc::now().date_naive(),
            total_spent: Price::ZERO,
            purchase_count: 0,
        };

        tracing::info!(id = %account.id, email = %account.email, "account registered");
        self.accounts.insert(0, account.clone());
        self.storage.save(&self.accounts)?;

        Ok(account)
    }

    /// Authenticate a returning customer.
    ///
    /// Verifies the supplied password against the account's own Argon2
    /// hash. There is no universal override value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::InvalidCredentials` if no account matches or the
    /// password is wrong.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = Email::parse(email)?;

        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)?;

        Ok(account.clone())
    }

    /// Record a completed checkout against an account.
    ///
    /// Bumps `purchase_count` by one and `total_spent` by `amount`,
    /// together. A silent no-op when no account matches the email (guest
    /// checkout updates nobody's bookkeeping).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the roster fails.
    pub fn record_purchase(&mut self, email: &Email, amount: Price) -> Result<(), StorageError> {
        let Some(account) = self.accounts.iter_mut().find(|a| &a.email == email) else {
            tracing::debug!(%email, "purchase not recorded: no matching account");
            return Ok(());
        };

        account.purchase_count += 1;
        account.total_spent = account.total_spent + amount;
        tracing::info!(
            id = %account.id,
            purchases = account.purchase_count,
            total_spent = %account.total_spent,
            "purchase recorded"
        );

        self.storage.save(&self.accounts)
    }

    /// The current roster, newest first.
    #[must_use]
    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    /// Filter the roster by a case-insensitive substring of name or
    /// email. An empty query returns everyone.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Account> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.accounts.iter().collect();
        }

        self.accounts
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&query)
                    || a.email.as_str().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Rewrite the current roster to storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.storage.save(&self.accounts)
    }
}

/// The built-in roster, used when storage is empty or corrupt.
fn seed_roster() -> Result<Vec<Account>, AuthError> {
    Ok(vec![
        seed_account(
            "Johann Strauss",
            "johann@vienna.at",
            NaiveDate::from_ymd_opt(2023, 11, 1),
            12550,
            4,
        )?,
        seed_account(
            "Clara Schumann",
            "clara@pianist.de",
            NaiveDate::from_ymd_opt(2023, 12, 15),
            4500,
            1,
        )?,
    ])
}

fn seed_account(
    name: &str,
    email: &str,
    joined: Option<NaiveDate>,
    spent_cents: i64,
    purchases: u32,
) -> Result<Account, AuthError> {
    Ok(Account {
        id: AccountId::new(),
        name: name.to_owned(),
        email: Email::parse(email)?,
        password_hash: hash_password("password123")?,
        joined: joined.unwrap_or_default(),
        total_spent: Price::from_cents(spent_cents).unwrap_or(Price::ZERO),
        purchase_count: purchases,
    })
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::Hash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
