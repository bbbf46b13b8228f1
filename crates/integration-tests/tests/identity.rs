//! Registration, authentication and session-gate scenarios.

use maestro_core::{AssetRef, Price, ProductKind};
use maestro_storefront::{
    AdminAccess, AuthError, Identity, ProductDraft, SessionError, StoreError, View,
};

use maestro_integration_tests::fresh_storefront;

#[test]
fn duplicate_email_is_rejected_and_roster_unchanged() {
    let mut store = fresh_storefront();

    store
        .sign_up("First", "a@x.com", "first-password", "first-password")
        .expect("first registration succeeds");
    store.sign_out();

    let second = store.sign_up("Second", "a@x.com", "other-password", "other-password");
    assert!(matches!(
        second,
        Err(StoreError::Auth(AuthError::EmailTaken))
    ));

    store.unlock_admin("102030").expect("admin unlocks");
    let matching = store.customers("a@x.com").expect("roster readable");
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "First");
}

#[test]
fn authentication_verifies_only_the_accounts_own_password() {
    let mut store = fresh_storefront();
    store
        .sign_up("Erik Satie", "erik@x.com", "gymnopedie", "gymnopedie")
        .expect("registration succeeds");
    store.sign_out();

    assert!(matches!(
        store.sign_in("erik@x.com", "wrong-password"),
        Err(StoreError::Auth(AuthError::InvalidCredentials))
    ));

    // The universal override password of the original design is gone.
    assert!(matches!(
        store.sign_in("erik@x.com", "admin"),
        Err(StoreError::Auth(AuthError::InvalidCredentials))
    ));

    let account = store
        .sign_in("erik@x.com", "gymnopedie")
        .expect("correct password signs in");
    assert_eq!(account.email.as_str(), "erik@x.com");
}

#[test]
fn seeded_customers_can_sign_in() {
    let mut store = fresh_storefront();
    let account = store
        .sign_in("clara@pianist.de", "password123")
        .expect("seeded account signs in");

    assert_eq!(account.name, "Clara Schumann");
    assert!(matches!(
        store.session().identity(),
        Identity::Customer { .. }
    ));
}

#[test]
fn wrong_admin_code_leaves_everything_locked() {
    let mut store = fresh_storefront();

    let result = store.unlock_admin("000000");
    assert!(matches!(
        result,
        Err(StoreError::Session(SessionError::AdminCodeMismatch))
    ));
    assert_eq!(store.session().admin_access(), AdminAccess::Locked);
    assert_eq!(store.session().view(), View::Store);
    assert!(store.session().admin_error_visible());

    // The gate still rejects catalog mutations.
    let draft = ProductDraft {
        title: "Unauthorized".to_string(),
        description: "Should never land.".to_string(),
        price: Price::from_cents(100).expect("price"),
        kind: ProductKind::Document,
        cover_image: "covers/x.jpg".to_string(),
        preview_audio_url: None,
        source_file: AssetRef::new("assets/x.pdf"),
    };
    assert!(store.add_product(draft).is_err());
}

#[test]
fn sign_out_resets_the_whole_session() {
    let mut store = fresh_storefront();
    store
        .sign_in("johann@vienna.at", "password123")
        .expect("seeded account signs in");
    store.unlock_admin("102030").expect("admin unlocks");
    let id = store.catalog().all().first().expect("seeded product").id;
    store.add_to_cart(id).expect("product addable");

    store.sign_out();

    assert_eq!(store.session().identity(), &Identity::Anonymous);
    assert_eq!(store.session().admin_access(), AdminAccess::Locked);
    assert_eq!(store.session().view(), View::Store);
    assert!(store.cart().is_empty());
}
