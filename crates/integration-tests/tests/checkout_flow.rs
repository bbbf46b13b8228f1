//! End-to-end checkout scenarios.
//!
//! Drives the storefront the way a front end would: browse, fill the
//! cart, sign in, check out, and verify the purchase record plus the
//! account bookkeeping it leaves behind.

use maestro_core::{Price, ProductId, ProductKind};
use maestro_storefront::{CheckoutError, KindFilter, StoreError, Storefront, View};

use maestro_integration_tests::fresh_storefront;

/// Find a seeded product's id by price.
fn product_id_by_cents(store: &Storefront, cents: i64) -> ProductId {
    store
        .catalog()
        .all()
        .iter()
        .find(|p| p.price == Price::from_cents(cents).expect("valid price"))
        .map(|p| p.id)
        .expect("seed catalog holds this price")
}

#[tokio::test]
async fn signed_in_checkout_updates_bookkeeping() {
    let mut store = fresh_storefront();

    // A brand-new account starts at zero.
    let account = store
        .sign_up("Erik Satie", "erik@montmartre.fr", "gymnopedie", "gymnopedie")
        .expect("sign-up succeeds");
    assert_eq!(account.purchase_count, 0);
    assert!(account.total_spent.is_zero());

    // $15.00 and $25.00 items from the seeded catalog.
    let nocturne = product_id_by_cents(&store, 1500);
    let waltz = product_id_by_cents(&store, 2500);
    store.add_to_cart(nocturne).expect("nocturne in catalog");
    store.add_to_cart(waltz).expect("waltz in catalog");
    assert_eq!(store.cart().total(), Price::from_cents(4000).expect("price"));

    let record = store
        .checkout("erik@montmartre.fr")
        .await
        .expect("checkout succeeds");

    assert_eq!(record.items.len(), 2);
    assert_eq!(record.total(), Price::from_cents(4000).expect("price"));
    assert!(store.cart().is_empty());
    assert_eq!(store.session().view(), View::Downloads);

    let roster = {
        store.unlock_admin("102030").expect("admin unlocks");
        store.customers("erik").expect("roster readable")
    };
    let erik = roster.first().expect("erik is registered");
    assert_eq!(erik.purchase_count, 1);
    assert_eq!(erik.total_spent, Price::from_cents(4000).expect("price"));
}

#[tokio::test]
async fn second_checkout_from_same_cart_is_impossible() {
    let mut store = fresh_storefront();
    let nocturne = product_id_by_cents(&store, 1500);
    store.add_to_cart(nocturne).expect("nocturne in catalog");

    store
        .checkout("composer@example.com")
        .await
        .expect("first checkout succeeds");

    // The first success emptied the cart, so a second attempt fails the
    // precondition instead of double-charging.
    let second = store.checkout("composer@example.com").await;
    assert!(matches!(
        second,
        Err(StoreError::Checkout(CheckoutError::EmptyCart))
    ));
}

#[tokio::test]
async fn checkout_requires_contact_email() {
    let mut store = fresh_storefront();
    let nocturne = product_id_by_cents(&store, 1500);
    store.add_to_cart(nocturne).expect("nocturne in catalog");

    let result = store.checkout("").await;
    assert!(matches!(
        result,
        Err(StoreError::Checkout(CheckoutError::MissingContactEmail))
    ));

    // The failed precondition left the cart intact for retry.
    assert_eq!(store.cart().item_count(), 1);
}

#[tokio::test]
async fn purchase_record_survives_catalog_edits() {
    let mut store = fresh_storefront();
    let nocturne = product_id_by_cents(&store, 1500);
    store.add_to_cart(nocturne).expect("nocturne in catalog");

    let record = store
        .checkout("composer@example.com")
        .await
        .expect("checkout succeeds");

    // Removing the product afterward cannot alter the snapshot.
    store.unlock_admin("102030").expect("admin unlocks");
    store.remove_product(nocturne).expect("removal persists");

    assert!(store.catalog().get(nocturne).is_none());
    let snapshot = record.items.first().expect("snapshot kept the item");
    assert_eq!(snapshot.id, nocturne);
    assert_eq!(snapshot.title, "Nocturne in G Minor");
}

#[tokio::test]
async fn browsing_filters_compose_with_checkout() {
    let mut store = fresh_storefront();

    // Case-insensitive substring search.
    let visible = store.browse("noct", KindFilter::All);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Nocturne in G Minor");

    // Kind filter applies regardless of query text.
    let documents = store.browse("", KindFilter::Only(ProductKind::Document));
    assert!(documents.iter().all(|p| p.kind == ProductKind::Document));

    let id = visible[0].id;
    store.add_to_cart(id).expect("visible product is addable");
    assert_eq!(store.cart().item_count(), 1);
}
