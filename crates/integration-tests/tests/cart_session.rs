//! Cart state across simulated app restarts.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use go_marketplace_cart::storage::{FileStore, KeyValueStore};
use go_marketplace_cart::store::{DEFAULT_STORAGE_KEY, HydrateOutcome};
use go_marketplace_core::CartChange;
use go_marketplace_integration_tests::{id, launch, product};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = launch(dir.path());
    assert_eq!(first.hydrate().await, HydrateOutcome::Empty);
    first.add_to_cart(product("A", 1000));
    first.add_to_cart(product("B", 250));
    first.add_to_cart(product("A", 1000));
    first.flush().await.unwrap();
    drop(first);

    let second = launch(dir.path());
    assert_eq!(second.hydrate().await, HydrateOutcome::Restored { items: 2 });
    let snapshot = second.snapshot();
    let ids: Vec<_> = snapshot.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["A", "B"]);
    assert_eq!(snapshot.get(&id("A")).unwrap().quantity, 2);
    assert_eq!(snapshot.total_price(), Decimal::new(2250, 2));
}

#[tokio::test]
async fn test_first_mutation_is_persisted() {
    let dir = tempfile::tempdir().unwrap();

    let store = launch(dir.path());
    store.hydrate().await;
    store.add_to_cart(product("A", 1000));
    store.flush().await.unwrap();

    let raw = FileStore::new(dir.path())
        .get(DEFAULT_STORAGE_KEY)
        .await
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "id": "A",
            "title": "Product A",
            "image_url": "https://cdn.example.com/A.png",
            "price": 10.0,
            "quantity": 1
        }])
    );
}

#[tokio::test]
async fn test_add_add_dec_dec_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let steps: [(&str, usize); 4] = [("add", 1), ("add", 1), ("dec", 1), ("dec", 0)];
    let expected_quantity = [Some(1), Some(2), Some(1), None];

    for ((op, expected_len), quantity) in steps.into_iter().zip(expected_quantity) {
        let store = launch(dir.path());
        store.hydrate().await;
        match op {
            "add" => {
                store.add_to_cart(product("A", 1000));
            }
            _ => {
                store.decrement(&id("A"));
            }
        }
        store.flush().await.unwrap();

        let reopened = launch(dir.path());
        reopened.hydrate().await;
        let snapshot = reopened.snapshot();
        assert_eq!(snapshot.items().len(), expected_len);
        assert_eq!(snapshot.get(&id("A")).map(|i| i.quantity), quantity);
    }
}

#[tokio::test]
async fn test_legacy_blob_is_restored() {
    let dir = tempfile::tempdir().unwrap();
    let blob = r#"[
        {"id":"1234","title":"Cadeira Rivatti","image_url":"https://cdn/1.png","price":1400,"quantity":2},
        {"id":"5678","title":"Poltrona","image_url":"https://cdn/2.png","price":299.9,"quantity":1}
    ]"#;
    FileStore::new(dir.path())
        .set(DEFAULT_STORAGE_KEY, blob.as_bytes().to_vec())
        .await
        .unwrap();

    let store = launch(dir.path());
    assert_eq!(store.hydrate().await, HydrateOutcome::Restored { items: 2 });
    assert_eq!(store.snapshot().total_quantity(), 3);
    assert_eq!(store.snapshot().total_price(), Decimal::new(30999, 1));
}

#[tokio::test]
async fn test_corrupt_blob_starts_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let files = FileStore::new(dir.path());
    files
        .set(DEFAULT_STORAGE_KEY, b"[{\"id\":".to_vec())
        .await
        .unwrap();

    let store = launch(dir.path());
    assert!(matches!(
        store.hydrate().await,
        HydrateOutcome::Discarded { .. }
    ));
    assert!(store.snapshot().is_empty());

    assert_eq!(store.add_to_cart(product("A", 100)), CartChange::Added);
    store.flush().await.unwrap();

    let reopened = launch(dir.path());
    assert_eq!(reopened.hydrate().await, HydrateOutcome::Restored { items: 1 });
}

#[tokio::test]
async fn test_rapid_mutations_persist_last_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = launch(dir.path());
    store.hydrate().await;

    store.add_to_cart(product("A", 100));
    for _ in 0..20 {
        store.increment(&id("A"));
    }
    for _ in 0..5 {
        store.decrement(&id("A"));
    }
    store.flush().await.unwrap();
    assert_eq!(store.persist_status().writes_completed, 26);

    let reopened = launch(dir.path());
    reopened.hydrate().await;
    assert_eq!(reopened.snapshot().get(&id("A")).unwrap().quantity, 16);
}
