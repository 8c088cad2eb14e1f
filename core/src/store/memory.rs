use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TodoStore;
use crate::error::StoreError;
use crate::id::TodoId;
use crate::types::{TodoPatch, TodoRecord};

/// Process-local gateway backed by a `HashMap`.
///
/// Cloning shares the same map, so a clone handed to the router and one kept
/// by a test observe the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<TodoId, TodoRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, record: TodoRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(StoreError::Backend(format!("duplicate key {}", record.id)));
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn update_by_id(&self, id: TodoId, patch: TodoPatch) -> Result<TodoRecord, StoreError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        record.apply(&patch);
        Ok(record.clone())
    }

    async fn remove_by_id(&self, id: TodoId) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }
}
