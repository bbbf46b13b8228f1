//! Account domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use maestro_core::{AccountId, Email, Price};

/// A registered customer.
///
/// `total_spent` and `purchase_count` are monotonically non-decreasing
/// and only move together, via the account's own successful checkouts.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Customer's display name.
    pub name: String,
    /// Unique email address (case-sensitive exact match).
    pub email: Email,
    /// Argon2 PHC hash of the customer's password.
    pub password_hash: String,
    /// Date the account was registered.
    pub joined: NaiveDate,
    /// Lifetime spend across completed checkouts.
    pub total_spent: Price,
    /// Number of completed checkouts.
    pub purchase_count: u32,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("joined", &self.joined)
            .field("total_spent", &self.total_spent)
            .field("purchase_count", &self.purchase_count)
            .finish()
    }
}
