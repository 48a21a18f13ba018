use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Revision number of a stored document, used for optimistic concurrency.
///
/// A document that has never been written is at revision 0; every successful
/// put increments it by one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revision(i64);

impl Revision {
    /// Creates a revision from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the revision of a document that does not exist yet.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the revision after the first write.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next revision.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw revision value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Revision {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Revision> for i64 {
    fn from(revision: Revision) -> Self {
        revision.0
    }
}

/// A named state document as held by a store.
///
/// The store treats `state` as opaque JSON; the domain layer decides what
/// shape it has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDocument {
    /// Name the document is stored under (e.g. `"farm_state"`).
    pub name: String,

    /// Revision of the document. On put this is the revision being written.
    pub revision: Revision,

    /// When the document was last written.
    pub updated_at: DateTime<Utc>,

    /// The serialized state.
    pub state: serde_json::Value,
}

impl StateDocument {
    /// Creates a new document stamped with the current time.
    pub fn new(name: impl Into<String>, revision: Revision, state: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            revision,
            updated_at: Utc::now(),
            state,
        }
    }

    /// Creates a document from a serializable state.
    pub fn from_state<T: Serialize>(
        name: impl Into<String>,
        revision: Revision,
        state: &T,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self::new(name, revision, serde_json::to_value(state)?))
    }

    /// Deserializes the state into a concrete type.
    pub fn into_state<T: for<'de> Deserialize<'de>>(self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_value(self.state)
    }
}
