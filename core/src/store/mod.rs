//! Store gateways for todo records.
//!
//! # Design
//! `TodoStore` is the only path to persisted records. Handlers hold an
//! `Arc<dyn TodoStore>` created once at startup, so tests can substitute the
//! in-memory gateway (or their own fakes) for MongoDB. Every call is a single
//! independent operation: no retries, no transactions, no existence
//! pre-checks. Errors come back unchanged as [`StoreError`].

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::id::TodoId;
use crate::types::{TodoPatch, TodoRecord};

pub use memory::MemoryStore;
pub use mongo::{MongoConfig, MongoStore};

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Persist a new record.
    async fn insert(&self, record: TodoRecord) -> Result<(), StoreError>;

    /// All records, in whatever order the store yields them.
    async fn find_all(&self) -> Result<Vec<TodoRecord>, StoreError>;

    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoRecord>, StoreError>;

    /// Apply `patch` to the record and return it as stored afterwards.
    /// Fails with [`StoreError::NotFound`] when no record matches.
    async fn update_by_id(&self, id: TodoId, patch: TodoPatch) -> Result<TodoRecord, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no record matches.
    async fn remove_by_id(&self, id: TodoId) -> Result<(), StoreError>;
}
