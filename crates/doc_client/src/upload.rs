use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    api::{DocumentApi, FileUpload},
    error::ClientError,
    ClientEvent, SharedStore,
};

/// Result of one upload batch. `EmptyBatch` means no request was issued.
#[derive(Debug)]
pub enum UploadOutcome {
    Completed { count: usize },
    EmptyBatch,
    Failed(ClientError),
}

impl UploadOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, UploadOutcome::Completed { .. })
    }
}

/// Submits local file batches as a single multipart request and merges the
/// acknowledged documents into the store. The merge is atomic: either the
/// whole returned batch is appended or nothing is.
pub struct UploadController {
    api: Arc<dyn DocumentApi>,
    store: SharedStore,
    events: broadcast::Sender<ClientEvent>,
}

impl UploadController {
    pub(crate) fn new(
        api: Arc<dyn DocumentApi>,
        store: SharedStore,
        events: broadcast::Sender<ClientEvent>,
    ) -> Self {
        Self { api, store, events }
    }

    pub async fn upload(&self, files: Vec<FileUpload>) -> UploadOutcome {
        if files.is_empty() {
            return UploadOutcome::EmptyBatch;
        }

        let batch_size = files.len();
        match self.api.upload(files).await {
            Ok(docs) => {
                let count = docs.len();
                self.store.write().await.append_all(docs);
                info!(batch_size, count, "upload acknowledged");
                let _ = self.events.send(ClientEvent::DocumentsUploaded { count });
                UploadOutcome::Completed { count }
            }
            Err(err) => {
                warn!(batch_size, error = %err, "upload failed; document list unchanged");
                let _ = self.events.send(ClientEvent::Error(err.to_string()));
                UploadOutcome::Failed(err)
            }
        }
    }
}
