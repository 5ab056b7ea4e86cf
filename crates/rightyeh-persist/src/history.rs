use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::HistoryEntry;

/// Local, non-durable record of conversation turns keyed by thread id
///
/// Sequences are append-only: entries are never reordered or edited after
/// insertion.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append an entry, creating the thread's sequence on first use
    async fn append(&self, thread_id: &str, entry: HistoryEntry);

    /// Register an empty sequence for a thread; existing entries are kept
    async fn init(&self, thread_id: &str);

    /// `None` if nothing was ever registered for the thread
    async fn get(&self, thread_id: &str) -> Option<Vec<HistoryEntry>>;

    /// Drop all history for a thread. Idempotent.
    async fn delete(&self, thread_id: &str);
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    threads: RwLock<HashMap<String, Vec<HistoryEntry>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn thread_count(&self) -> usize {
        self.threads.read().await.len()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, thread_id: &str, entry: HistoryEntry) {
        let mut threads = self.threads.write().await;
        threads.entry(thread_id.to_string()).or_default().push(entry);
    }

    async fn init(&self, thread_id: &str) {
        let mut threads = self.threads.write().await;
        threads.entry(thread_id.to_string()).or_default();
    }

    async fn get(&self, thread_id: &str) -> Option<Vec<HistoryEntry>> {
        self.threads.read().await.get(thread_id).cloned()
    }

    async fn delete(&self, thread_id: &str) {
        if self.threads.write().await.remove(thread_id).is_some() {
            tracing::debug!(thread_id = %thread_id, "Removed chat history");
        }
    }
}
