//! Client-side state synchronization for a document repository service.
//!
//! A [`DocumentSession`] owns the in-memory [`DocumentStore`] and the two
//! controllers that may mutate it: [`QueryController`] replaces the list from
//! list/search responses (discarding responses superseded by newer queries),
//! and [`UploadController`] appends the documents acknowledged for a
//! multipart upload batch. All service failures are classified into
//! [`ClientError`] at the controller boundary and reported on a broadcast
//! event channel; the store always keeps the last good state.

use std::sync::Arc;

use anyhow::Result;
use shared::domain::{Document, DocumentId};
use tokio::sync::{broadcast, RwLock};

pub mod api;
pub mod config;
pub mod error;
pub mod query;
pub mod store;
pub mod upload;

pub use api::{DocumentApi, FileUpload, HttpDocumentApi};
pub use config::{load_settings, ServiceConfig};
pub use error::ClientError;
pub use query::{QueryController, RefreshOutcome};
pub use store::DocumentStore;
pub use upload::{UploadController, UploadOutcome};

pub(crate) type SharedStore = Arc<RwLock<DocumentStore>>;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// User-visible notifications emitted by the controllers. Stale-response
/// discards are deliberately absent: they are routine, not reportable.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    DocumentsRefreshed { query: String, count: usize },
    DocumentsUploaded { count: usize },
    Error(String),
}

/// One client session against a document service: an empty store plus the
/// controllers wired to a shared API handle and event channel. Dropped with
/// the session; nothing is persisted.
pub struct DocumentSession {
    api: Arc<dyn DocumentApi>,
    store: SharedStore,
    events: broadcast::Sender<ClientEvent>,
    query: QueryController,
    uploads: UploadController,
}

impl DocumentSession {
    /// Connects to the HTTP service described by `config`.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::with_api(Arc::new(HttpDocumentApi::new(config)?)))
    }

    /// Wires the session to an arbitrary [`DocumentApi`] implementation.
    pub fn with_api(api: Arc<dyn DocumentApi>) -> Self {
        let store: SharedStore = Arc::new(RwLock::new(DocumentStore::new()));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let query = QueryController::new(Arc::clone(&api), Arc::clone(&store), events.clone());
        let uploads = UploadController::new(Arc::clone(&api), Arc::clone(&store), events.clone());
        Self {
            api,
            store,
            events,
            query,
            uploads,
        }
    }

    pub fn query(&self) -> &QueryController {
        &self.query
    }

    pub fn uploads(&self) -> &UploadController {
        &self.uploads
    }

    /// Owned snapshot of the current document list. A refresh or upload
    /// landing after this call is not reflected in the returned vector.
    pub async fn documents(&self) -> Vec<Document> {
        self.store.read().await.snapshot()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Fetches a document's raw bytes by id.
    pub async fn download(&self, id: &DocumentId) -> std::result::Result<Vec<u8>, ClientError> {
        self.api.download(id).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
