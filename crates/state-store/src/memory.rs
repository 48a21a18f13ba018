use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    Result, Revision, StateDocument, StoreError,
    store::{PutOptions, StateStore},
};

/// In-memory state store implementation for testing.
///
/// This implementation keeps documents in memory and provides
/// the same interface as the SQLite implementation.
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    documents: Arc<RwLock<HashMap<String, StateDocument>>>,
}

impl InMemoryStateStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents stored.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Removes all documents.
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, name: &str) -> Result<Option<StateDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.get(name).cloned())
    }

    async fn put(&self, mut document: StateDocument, options: PutOptions) -> Result<Revision> {
        let mut documents = self.documents.write().await;

        let current = documents
            .get(&document.name)
            .map(|d| d.revision)
            .unwrap_or(Revision::initial());

        if let Some(expected) = options.expected_revision
            && current != expected
        {
            return Err(StoreError::RevisionConflict {
                name: document.name,
                expected,
                actual: current,
            });
        }

        let revision = current.next();
        document.revision = revision;
        document.updated_at = Utc::now();
        documents.insert(document.name.clone(), document);

        metrics::counter!("state_store_puts_total", "backend" => "memory").increment(1);
        Ok(revision)
    }

    async fn get_revision(&self, name: &str) -> Result<Revision> {
        let documents = self.documents.read().await;
        Ok(documents
            .get(name)
            .map(|d| d.revision)
            .unwrap_or(Revision::initial()))
    }
}
