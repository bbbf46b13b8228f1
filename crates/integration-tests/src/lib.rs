//! Integration tests for Maestro.
//!
//! The scenarios in `tests/` drive a [`maestro_storefront::Storefront`]
//! directly, the way a surrounding front end would. Each test gets its
//! own data directory under the system temp dir and millisecond-scale
//! simulated collaborator delays, so the suite needs no network, no
//! database and no timer mocking.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p maestro-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use maestro_storefront::{StoreConfig, Storefront};

/// Admin code the test configuration uses.
pub const TEST_ADMIN_CODE: &str = "102030";

/// A fresh, empty data directory under the system temp dir.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn temp_data_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("maestro-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("failed to create test data dir");
    dir
}

/// A test configuration over the given data directory.
#[must_use]
pub fn test_config(data_dir: PathBuf) -> StoreConfig {
    StoreConfig {
        data_dir,
        admin_code: SecretString::from(TEST_ADMIN_CODE),
        payment_delay: Duration::from_millis(5),
        watermark_delay: Duration::from_millis(5),
        assistant: None,
    }
}

/// A storefront over a fresh data directory, seeded with the defaults.
///
/// # Panics
///
/// Panics if the storefront cannot be built.
#[must_use]
pub fn fresh_storefront() -> Storefront {
    init_tracing();
    Storefront::new(test_config(temp_data_dir())).expect("failed to build storefront")
}

/// Initialize tracing once for the whole test binary.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "maestro_storefront=info".into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}
