use async_trait::async_trait;

use crate::{Result, Revision, StateDocument};

/// Options for writing a document to the store.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Revision the writer loaded the document at.
    /// If None, no revision check is performed and the write always wins.
    pub expected_revision: Option<Revision>,
}

impl PutOptions {
    /// Creates options with no revision check (last write wins).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the stored document to be at a specific revision.
    pub fn expect_revision(revision: Revision) -> Self {
        Self {
            expected_revision: Some(revision),
        }
    }

    /// Creates options expecting the document not to exist yet.
    pub fn expect_new() -> Self {
        Self {
            expected_revision: Some(Revision::initial()),
        }
    }
}

/// Core trait for state document stores.
///
/// A store holds named documents, each read and replaced as an atomic unit.
/// There are no partial or field-level writes.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Retrieves the document stored under `name`.
    ///
    /// Returns None if nothing has been stored yet.
    async fn get(&self, name: &str) -> Result<Option<StateDocument>>;

    /// Replaces the document stored under `document.name`.
    ///
    /// If `options.expected_revision` is set, the write fails with
    /// `RevisionConflict` when the stored revision differs. The revision in
    /// `document` is ignored; the store assigns the next one.
    ///
    /// Returns the revision of the document after the write.
    async fn put(&self, document: StateDocument, options: PutOptions) -> Result<Revision>;

    /// Gets the current revision of a document.
    ///
    /// Returns `Revision::initial()` if the document doesn't exist.
    async fn get_revision(&self, name: &str) -> Result<Revision>;
}

/// Extension trait providing convenience methods for state stores.
#[async_trait]
pub trait StateStoreExt: StateStore {
    /// Retrieves a document, falling back to `default_state` at the initial
    /// revision when nothing is stored.
    async fn get_or_default(
        &self,
        name: &str,
        default_state: serde_json::Value,
    ) -> Result<StateDocument> {
        match self.get(name).await? {
            Some(document) => Ok(document),
            None => Ok(StateDocument::new(name, Revision::initial(), default_state)),
        }
    }

    /// Checks if a document has ever been written.
    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.get_revision(name).await? > Revision::initial())
    }
}

// Blanket implementation for all StateStore implementations
impl<T: StateStore + ?Sized> StateStoreExt for T {}
