//! Background persistence of one document entity
//!
//! Every entity gets a single writer task fed through a latest-value
//! mailbox. Scheduling a snapshot never waits on I/O: it replaces whatever
//! snapshot is still pending, and the writer always picks up the newest one.
//! Writes of one entity therefore never overlap, and a newer snapshot can
//! never be overwritten on disk by an older one.

use shared::{Component, component_debug, component_error};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify, watch};
use tokio::task::JoinHandle;

use crate::services::file_repository::save;
use crate::traits::{Document, Storage};

/// Single-writer persistence handle for documents of type `D`
pub struct Persister<D: Document> {
    component: Component,
    sender: watch::Sender<D>,
    closing: Arc<Notify>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<D: Document> Persister<D> {
    /// Spawn the writer task. `current` is the state already on disk; it is
    /// not written again until a new snapshot is scheduled.
    pub fn spawn(component: Component, storage: Arc<dyn Storage>, current: D) -> Self {
        let (sender, receiver) = watch::channel(current);
        let closing = Arc::new(Notify::new());
        let worker = tokio::spawn(run_writer(component, storage, receiver, closing.clone()));

        Self {
            component,
            sender,
            closing,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Queue `document` for writing, replacing any snapshot not yet written
    pub fn schedule(&self, document: D) {
        self.sender.send_replace(document);
    }

    /// Write any pending snapshot, then stop the writer task
    pub async fn close(&self) {
        let Some(worker) = self.worker.lock().await.take() else {
            return;
        };

        self.closing.notify_one();
        if let Err(e) = worker.await {
            component_error!(self.component, "❌ {} writer task failed: {}", D::ENTITY, e);
        }
    }
}

async fn run_writer<D: Document>(
    component: Component,
    storage: Arc<dyn Storage>,
    mut receiver: watch::Receiver<D>,
    closing: Arc<Notify>,
) {
    loop {
        tokio::select! {
            biased;
            changed = receiver.changed() => {
                if changed.is_err() {
                    break;
                }
                let document = receiver.borrow_and_update().clone();
                write_snapshot(component, storage.as_ref(), &document).await;
            }
            _ = closing.notified() => {
                if receiver.has_changed().unwrap_or(false) {
                    let document = receiver.borrow_and_update().clone();
                    write_snapshot(component, storage.as_ref(), &document).await;
                }
                break;
            }
        }
    }
    component_debug!(component, "🛑 {} writer stopped", D::ENTITY);
}

async fn write_snapshot<D: Document>(component: Component, storage: &dyn Storage, document: &D) {
    // Failures leave the previous copy on disk
    if let Err(e) = save(storage, document).await {
        component_error!(component, "❌ Persisting {} failed: {}", D::ENTITY, e);
    }
}
