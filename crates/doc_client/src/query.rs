use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{api::DocumentApi, error::ClientError, ClientEvent, SharedStore};

/// Result of one refresh. `Stale` is not a failure: the response was
/// superseded by a newer query and its effects were suppressed.
#[derive(Debug)]
pub enum RefreshOutcome {
    Applied { count: usize },
    Stale,
    Failed(ClientError),
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

struct QueryState {
    current_query: String,
    issue_seq: u64,
}

/// Turns search-box changes into authoritative document-list refreshes.
///
/// Requests are never cancelled; instead each refresh takes a monotonic issue
/// number and a response is applied only if no newer refresh was issued while
/// it was in flight. The store therefore always reflects the most recently
/// entered query, however slowly earlier responses trickle in.
pub struct QueryController {
    api: Arc<dyn DocumentApi>,
    store: SharedStore,
    events: broadcast::Sender<ClientEvent>,
    state: Mutex<QueryState>,
}

impl QueryController {
    pub(crate) fn new(
        api: Arc<dyn DocumentApi>,
        store: SharedStore,
        events: broadcast::Sender<ClientEvent>,
    ) -> Self {
        Self {
            api,
            store,
            events,
            state: Mutex::new(QueryState {
                current_query: String::new(),
                issue_seq: 0,
            }),
        }
    }

    /// Records `new_query` as the current search term and refreshes. The
    /// empty string means "no filter" and lists everything.
    pub async fn on_query_change(&self, new_query: impl Into<String>) -> RefreshOutcome {
        {
            let mut state = self.state.lock().await;
            state.current_query = new_query.into();
        }
        self.refresh().await
    }

    pub async fn current_query(&self) -> String {
        self.state.lock().await.current_query.clone()
    }

    /// Fetches the document list for the current query and replaces the store
    /// with it, unless a newer refresh was issued while this one was in
    /// flight.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (query, seq) = {
            let mut state = self.state.lock().await;
            state.issue_seq += 1;
            (state.current_query.clone(), state.issue_seq)
        };

        let result = if query.is_empty() {
            self.api.list_all().await
        } else {
            self.api.search(&query).await
        };

        // Hold the state lock across the store write so a concurrent refresh
        // cannot interleave between the staleness check and the apply.
        let state = self.state.lock().await;
        if seq != state.issue_seq {
            debug!(
                seq,
                latest = state.issue_seq,
                query = %query,
                "discarding stale refresh response"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(docs) => {
                let count = docs.len();
                self.store.write().await.replace_all(docs);
                info!(count, query = %query, "document list refreshed");
                let _ = self.events.send(ClientEvent::DocumentsRefreshed { query, count });
                RefreshOutcome::Applied { count }
            }
            Err(err) => {
                warn!(query = %query, error = %err, "refresh failed; keeping current document list");
                let _ = self.events.send(ClientEvent::Error(err.to_string()));
                RefreshOutcome::Failed(err)
            }
        }
    }
}
