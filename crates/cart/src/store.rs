//! The cart state container.
//!
//! [`CartStore`] is the single source of truth for the session's cart. Its
//! three mutations apply synchronously to the in-memory cart, publish a new
//! [`CartSnapshot`] to subscribers and enqueue a write of the full cart to
//! storage. The cart is loaded from storage once, by [`CartStore::hydrate`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use go_marketplace_core::{Cart, CartChange, CurrencyCode, LineItem, ProductId, ProductPreview};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::persist::{PersistStatus, WriteQueue};
use crate::storage::KeyValueStore;

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:shoppingCartList";

/// An immutable view of the cart at one point in time.
///
/// Cheap to clone; holders never observe later mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    items: Arc<[LineItem]>,
}

impl CartSnapshot {
    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        go_marketplace_core::total_quantity(&self.items)
    }

    /// Sum of `price * quantity` over all line items.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        go_marketplace_core::total_price(&self.items)
    }
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            items: Arc::from(cart.items()),
        }
    }
}

/// What [`CartStore::hydrate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// A stored cart was loaded.
    Restored { items: usize },
    /// Nothing was stored; the cart stays empty.
    Empty,
    /// The stored value could not be read or decoded; the cart stays empty.
    Discarded { reason: String },
    /// The cart was mutated before the stored value was applied. The
    /// in-memory cart wins because it has already been written back.
    Superseded,
    /// `hydrate` had already run.
    AlreadyHydrated,
}

/// Cloneable handle to the cart state container.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    cart: Mutex<Cart>,
    snapshots: watch::Sender<CartSnapshot>,
    queue: WriteQueue,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    currency: CurrencyCode,
    hydrated: AtomicBool,
    mutations: AtomicU64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("currency", &self.inner.currency)
            .field("items", &self.snapshot().items().len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty cart persisted to `storage` under `key`.
    ///
    /// Must be called from within a tokio runtime: the background writer is
    /// spawned here.
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        currency: CurrencyCode,
    ) -> Self {
        let key = key.into();
        let queue = WriteQueue::spawn(Arc::clone(&storage), key.clone());
        let (snapshots, _) = watch::channel(CartSnapshot::default());

        Self {
            inner: Arc::new(CartStoreInner {
                cart: Mutex::new(Cart::new()),
                snapshots,
                queue,
                storage,
                key,
                currency,
                hydrated: AtomicBool::new(false),
                mutations: AtomicU64::new(0),
            }),
        }
    }

    /// Load the persisted cart, once.
    ///
    /// A missing, unreadable, unparseable or invalid stored value leaves the
    /// cart empty; this never fails.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn hydrate(&self) -> HydrateOutcome {
        if self.inner.hydrated.swap(true, Ordering::SeqCst) {
            return HydrateOutcome::AlreadyHydrated;
        }

        let stored = match self.inner.storage.get(&self.inner.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!("No stored cart, starting empty");
                return HydrateOutcome::Empty;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                return HydrateOutcome::Discarded {
                    reason: e.to_string(),
                };
            }
        };

        let cart: Cart = match serde_json::from_slice(&stored) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "Stored cart is invalid, starting empty");
                return HydrateOutcome::Discarded {
                    reason: e.to_string(),
                };
            }
        };

        let mut current = self.lock_cart();
        if self.inner.mutations.load(Ordering::SeqCst) > 0 {
            warn!("Cart changed while loading, keeping in-memory cart");
            return HydrateOutcome::Superseded;
        }
        let items = cart.len();
        *current = cart;
        self.inner.snapshots.send_replace(CartSnapshot::from(&*current));
        drop(current);

        info!(items, "Restored stored cart");
        HydrateOutcome::Restored { items }
    }

    /// Add one unit of `preview`: a new line item with quantity 1, or +1 on
    /// the existing one.
    pub fn add_to_cart(&self, preview: ProductPreview) -> CartChange {
        let id = preview.id.clone();
        let change = self.mutate(|cart| cart.add(preview));
        debug!(product_id = %id, ?change, "add_to_cart");
        change
    }

    /// +1 on the line item for `id`. No-op if absent.
    pub fn increment(&self, id: &ProductId) -> CartChange {
        let change = self.mutate(|cart| cart.increment(id));
        debug!(product_id = %id, ?change, "increment");
        change
    }

    /// -1 on the line item for `id`, removing it when it reaches zero. No-op
    /// if absent.
    pub fn decrement(&self, id: &ProductId) -> CartChange {
        let change = self.mutate(|cart| cart.decrement(id));
        debug!(product_id = %id, ?change, "decrement");
        change
    }

    /// The current cart.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    /// Receive a new snapshot after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.snapshots.subscribe()
    }

    /// Currency the cart's prices are expressed in.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.currency
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    /// Current write health.
    #[must_use]
    pub fn persist_status(&self) -> PersistStatus {
        self.inner.queue.status()
    }

    /// Wait for every write issued so far.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Persist` if the latest write failed, leaving
    /// storage behind memory, or `CartError::WriterStopped` if the writer
    /// task is gone.
    pub async fn flush(&self) -> Result<()> {
        self.inner.queue.flush().await
    }

    /// Apply `op`, publish the result and enqueue its write.
    ///
    /// The lock is held until the write is queued so queue order always
    /// matches mutation order.
    fn mutate(&self, op: impl FnOnce(&mut Cart) -> CartChange) -> CartChange {
        let mut cart = self.lock_cart();
        let change = op(&mut cart);
        self.inner.mutations.fetch_add(1, Ordering::SeqCst);
        self.inner.snapshots.send_replace(CartSnapshot::from(&*cart));
        self.inner.queue.enqueue(serde_json::to_vec(&*cart));
        drop(cart);
        change
    }

    fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
