//! Durable-store scenarios: rehydration, round-trips and corruption.

use maestro_core::{AssetRef, Price, ProductKind};
use maestro_storefront::{Account, Product, ProductDraft, Storefront};

use maestro_integration_tests::{temp_data_dir, test_config};

fn draft(title: &str) -> ProductDraft {
    ProductDraft {
        title: title.to_string(),
        description: "A freshly registered score.".to_string(),
        price: Price::from_cents(1200).expect("price"),
        kind: ProductKind::Document,
        cover_image: "covers/fresh.jpg".to_string(),
        preview_audio_url: None,
        source_file: AssetRef::new("assets/scores/fresh.pdf"),
    }
}

#[tokio::test]
async fn restart_rehydrates_identical_state() {
    let dir = temp_data_dir();

    let (catalog_before, roster_before): (Vec<Product>, Vec<Account>) = {
        let mut store = Storefront::new(test_config(dir.clone())).expect("storefront builds");

        store.unlock_admin("102030").expect("admin unlocks");
        store.add_product(draft("Registered Before Restart")).expect("product persists");
        store
            .sign_up("Erik Satie", "erik@x.com", "gymnopedie", "gymnopedie")
            .expect("registration persists");

        // Bookkeeping mutations must survive too.
        let id = store.catalog().all().first().expect("catalog non-empty").id;
        store.add_to_cart(id).expect("product addable");
        store.checkout("erik@x.com").await.expect("checkout succeeds");

        let catalog = store.catalog().all().to_vec();
        let roster = store.customers("").expect("roster readable").into_iter().cloned().collect();
        store.shutdown().expect("final flush succeeds");
        (catalog, roster)
    };

    // "Restart": a second storefront over the same data directory.
    let mut reopened = Storefront::new(test_config(dir)).expect("storefront rebuilds");
    reopened.unlock_admin("102030").expect("admin unlocks");

    assert_eq!(reopened.catalog().all(), catalog_before.as_slice());
    let roster_after: Vec<Account> = reopened
        .customers("")
        .expect("roster readable")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(roster_after, roster_before);

    // The cart was deliberately not persisted.
    assert!(reopened.cart().is_empty());
}

#[test]
fn corrupt_store_files_fall_back_to_seeds() {
    let dir = temp_data_dir();
    std::fs::write(dir.join("catalog.json"), "{definitely not json").expect("write");
    std::fs::write(dir.join("accounts.json"), "[{\"broken\":").expect("write");

    let mut store = Storefront::new(test_config(dir)).expect("corruption is absorbed");

    assert_eq!(store.catalog().all().len(), 4);
    store.unlock_admin("102030").expect("admin unlocks");
    assert_eq!(store.customers("").expect("roster readable").len(), 2);
}

#[test]
fn catalog_mutations_persist_without_touching_accounts() {
    let dir = temp_data_dir();

    {
        let mut store = Storefront::new(test_config(dir.clone())).expect("storefront builds");
        store.unlock_admin("102030").expect("admin unlocks");
        let victim = store.catalog().all().first().expect("catalog non-empty").id;
        store.remove_product(victim).expect("removal persists");
    }

    let mut reopened = Storefront::new(test_config(dir)).expect("storefront rebuilds");
    assert_eq!(reopened.catalog().all().len(), 3);

    // The independent accounts record is untouched.
    reopened.unlock_admin("102030").expect("admin unlocks");
    assert_eq!(reopened.customers("").expect("roster readable").len(), 2);
}
