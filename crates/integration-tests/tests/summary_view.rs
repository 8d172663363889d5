//! The floating summary wired through the composition root.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use go_marketplace_cart::config::CartConfig;
use go_marketplace_cart::navigation::{Navigator, Route};
use go_marketplace_cart::state::AppState;
use go_marketplace_integration_tests::{id, product};

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<&'static str>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route.as_str());
    }
}

fn config(dir: &std::path::Path) -> CartConfig {
    let data_dir = dir.to_string_lossy().into_owned();
    CartConfig::from_lookup(|key| match key {
        "GM_DATA_DIR" => Some(data_dir.clone()),
        "GM_CURRENCY" => Some("USD".to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_summary_follows_cart_and_navigates() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::bootstrap(config(dir.path())).await.unwrap();
    let navigator = Arc::new(RecordingNavigator::default());
    let mut view = state.summary_view(Arc::clone(&navigator)).unwrap();

    assert_eq!(view.summary().quantity_label(), "0 items");
    assert_eq!(view.summary().formatted_total(), "$0.00");

    let cart = state.cart().unwrap();
    cart.add_to_cart(product("A", 1000));
    let summary = view.changed().await.unwrap();
    assert_eq!(summary.quantity_label(), "1 item");

    cart.add_to_cart(product("A", 1000));
    cart.add_to_cart(product("B", 123_456));
    cart.decrement(&id("A"));
    assert_eq!(view.summary().quantity_label(), "2 items");
    assert_eq!(view.summary().formatted_total(), "$1,244.56");

    view.open_cart();
    assert_eq!(*navigator.routes.lock().unwrap(), ["Cart"]);
    assert_eq!(state.cart().unwrap().snapshot().total_quantity(), 2);
}

#[tokio::test]
async fn test_summary_view_requires_cart() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(config(dir.path())).unwrap();
    assert!(state.summary_view(RecordingNavigator::default()).is_err());
}
