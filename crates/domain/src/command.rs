//! Command handling infrastructure.

use std::marker::PhantomData;

use serde::Serialize;
use state_store::{PutOptions, Revision, StateDocument, StateStore};

use crate::aggregate::Aggregate;
use crate::error::DomainError;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The aggregate after applying the new events.
    pub aggregate: A,

    /// The events that were generated and persisted.
    pub events: Vec<A::Event>,

    /// The revision of the stored document after the command.
    pub revision: Revision,
}

/// Trait for commands that can be executed against an aggregate.
///
/// Commands represent an intention to perform an action. They may be rejected
/// if the aggregate's current state doesn't allow the action.
pub trait Command: Send + Sync {
    /// The type of aggregate this command targets.
    type Aggregate: Aggregate;

    /// Returns the command name, used for logging and metrics labels.
    fn command_type(&self) -> &'static str;
}

/// Handler for executing commands against an aggregate document.
///
/// The handler is responsible for:
/// 1. Loading the aggregate from the state store (or starting from default)
/// 2. Executing the command to produce events
/// 3. Applying the events to compute the next state
/// 4. Writing the whole state back with a revision check
///
/// Nothing is written when the command is rejected or produces no events.
pub struct CommandHandler<S, A>
where
    S: StateStore,
    A: Aggregate,
{
    store: S,
    document: String,
    _phantom: PhantomData<A>,
}

impl<S, A> CommandHandler<S, A>
where
    S: StateStore,
    A: Aggregate,
{
    /// Creates a handler over the aggregate's default document.
    pub fn new(store: S) -> Self {
        Self::with_document(store, A::document_name())
    }

    /// Creates a handler over a named document.
    pub fn with_document(store: S, document: impl Into<String>) -> Self {
        Self {
            store,
            document: document.into(),
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying state store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the name of the document this handler reads and writes.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Loads the aggregate from the state store.
    ///
    /// If nothing has been stored yet, returns a default instance at the
    /// initial revision.
    pub async fn load(&self) -> Result<A, DomainError> {
        let Some(document) = self.store.get(&self.document).await? else {
            return Ok(A::default());
        };

        let revision = document.revision;
        let mut aggregate: A = document.into_state()?;
        aggregate.set_revision(revision);
        Ok(aggregate)
    }

    /// Executes a command and persists the resulting state.
    ///
    /// The command function receives the current aggregate state and returns
    /// either a list of events to apply, or an error.
    pub async fn execute<F>(&self, command_fn: F) -> Result<CommandResult<A>, DomainError>
    where
        A::Event: Serialize,
        F: FnOnce(&A) -> Result<Vec<A::Event>, A::Error>,
        DomainError: From<A::Error>,
    {
        let mut aggregate = self.load().await?;
        let current_revision = aggregate.revision();

        // Execute command to get events
        let events = command_fn(&aggregate)?;

        if events.is_empty() {
            return Ok(CommandResult {
                aggregate,
                events: vec![],
                revision: current_revision,
            });
        }

        for event in &events {
            aggregate.apply(event.clone());
        }

        let document =
            StateDocument::from_state(&self.document, current_revision.next(), &aggregate)?;

        // Optimistic concurrency: fail if another writer got there first
        let options = if current_revision == Revision::initial() {
            PutOptions::expect_new()
        } else {
            PutOptions::expect_revision(current_revision)
        };

        let revision = self.store.put(document, options).await?;
        aggregate.set_revision(revision);

        Ok(CommandResult {
            aggregate,
            events,
            revision,
        })
    }
}
