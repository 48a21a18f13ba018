//! Persistence for the farm state document.
//!
//! The farm keeps its entire state in a single document that is read and
//! replaced as a unit. This crate provides:
//! - [`StateStore`] trait describing get/put of a named document
//! - [`InMemoryStateStore`] for tests and ephemeral use
//! - [`SqliteStateStore`] for durable local storage

pub mod document;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use document::{Revision, StateDocument};
pub use error::{Result, StoreError};
pub use memory::InMemoryStateStore;
pub use sqlite::SqliteStateStore;
pub use store::{PutOptions, StateStore, StateStoreExt};
