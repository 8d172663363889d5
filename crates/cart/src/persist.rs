//! Ordered write queue between the cart and its storage backend.
//!
//! Every cart mutation enqueues a full serialized cart. A single background
//! task drains the queue and writes each blob in enqueue order, so the last
//! mutation always determines what ends up in storage. Failures are logged
//! and recorded in [`PersistStatus`]; nothing is retried.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use crate::error::{CartError, Result};
use crate::storage::KeyValueStore;

/// Health of the cart's persisted copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistStatus {
    /// Writes handed to the queue.
    pub writes_issued: u64,
    /// Writes the backend accepted.
    pub writes_completed: u64,
    /// Writes the backend rejected (or that could not be serialized).
    pub writes_failed: u64,
    /// Message of the most recent failure, cleared by the next success.
    pub last_error: Option<String>,
}

impl PersistStatus {
    /// Writes issued but not yet finished.
    #[must_use]
    pub const fn pending(&self) -> u64 {
        self.writes_issued
            .saturating_sub(self.writes_completed)
            .saturating_sub(self.writes_failed)
    }

    /// True when the latest finished write failed, meaning storage holds an
    /// older cart than memory does.
    #[must_use]
    pub const fn is_diverged(&self) -> bool {
        self.last_error.is_some()
    }
}

enum WriteCommand {
    Write(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Sending half of the write queue plus the shared status it updates.
#[derive(Debug)]
pub(crate) struct WriteQueue {
    tx: mpsc::UnboundedSender<WriteCommand>,
    status: Arc<Mutex<PersistStatus>>,
}

impl std::fmt::Debug for WriteCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write(bytes) => f.debug_tuple("Write").field(&bytes.len()).finish(),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

impl WriteQueue {
    /// Start the writer task for `key` on the current tokio runtime.
    pub(crate) fn spawn(storage: Arc<dyn KeyValueStore>, key: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let status = Arc::new(Mutex::new(PersistStatus::default()));
        tokio::spawn(run_writer(rx, storage, key, Arc::clone(&status)));
        Self { tx, status }
    }

    /// Queue a serialized cart. Never blocks.
    pub(crate) fn enqueue(&self, blob: serde_json::Result<Vec<u8>>) {
        let mut status = self.lock_status();
        status.writes_issued += 1;

        let bytes = match blob {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart");
                status.writes_failed += 1;
                status.last_error = Some(e.to_string());
                return;
            }
        };

        if self.tx.send(WriteCommand::Write(bytes)).is_err() {
            error!("Cart writer stopped; write dropped");
            status.writes_failed += 1;
            status.last_error = Some("cart writer stopped".to_string());
        }
    }

    /// Wait until every write queued so far has finished.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Persist` if the latest finished write failed and
    /// `CartError::WriterStopped` if the writer task is gone.
    pub(crate) async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(WriteCommand::Flush(done_tx))
            .map_err(|_| CartError::WriterStopped)?;
        done_rx.await.map_err(|_| CartError::WriterStopped)?;

        match self.status().last_error {
            Some(message) => Err(CartError::Persist(message)),
            None => Ok(()),
        }
    }

    pub(crate) fn status(&self) -> PersistStatus {
        self.lock_status().clone()
    }

    fn lock_status(&self) -> std::sync::MutexGuard<'_, PersistStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn run_writer(
    mut rx: mpsc::UnboundedReceiver<WriteCommand>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    status: Arc<Mutex<PersistStatus>>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            WriteCommand::Write(bytes) => {
                let len = bytes.len();
                let result = storage.set(&key, bytes).await;
                let mut status = status.lock().unwrap_or_else(PoisonError::into_inner);
                match result {
                    Ok(()) => {
                        status.writes_completed += 1;
                        status.last_error = None;
                        debug!(key = %key, len, "Cart persisted");
                    }
                    Err(e) => {
                        status.writes_failed += 1;
                        status.last_error = Some(e.to_string());
                        error!(key = %key, error = %e, "Failed to persist cart");
                    }
                }
            }
            WriteCommand::Flush(done) => {
                // The flusher may have stopped waiting; nothing to do then.
                let _ = done.send(());
            }
        }
    }
    debug!(key = %key, "Cart writer stopped");
}
