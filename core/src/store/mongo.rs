use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};

use super::TodoStore;
use crate::error::StoreError;
use crate::id::TodoId;
use crate::types::{TodoPatch, TodoRecord};

/// Where the MongoDB gateway connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// `host:port` of the server.
    pub host: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: "localhost:27017".to_string(),
            database: "demo_todo".to_string(),
            collection: "todo".to_string(),
        }
    }
}

impl MongoConfig {
    pub fn uri(&self) -> String {
        format!("mongodb://{}", self.host)
    }
}

/// Gateway over a single MongoDB collection.
///
/// The driver's `Client` is a pooled handle that is safe to share across
/// tasks; clones of this gateway reuse it.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<TodoRecord>,
}

impl MongoStore {
    /// Connect and ping the database. The driver connects lazily, so the
    /// ping is what turns an unreachable server into a startup error.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let connect_err = |err: mongodb::error::Error| StoreError::Connect {
            host: config.host.clone(),
            message: err.to_string(),
        };

        let client = Client::with_uri_str(config.uri()).await.map_err(connect_err)?;
        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connect_err)?;

        tracing::info!(
            host = %config.host,
            database = %config.database,
            collection = %config.collection,
            "connected to mongodb"
        );

        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

fn by_id(id: TodoId) -> Document {
    doc! { "_id": id.as_object_id() }
}

fn set_fields(patch: &TodoPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.clone());
    }
    if let Some(completed) = patch.completed {
        set.insert("completed", completed);
    }
    set
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn insert(&self, record: TodoRecord) -> Result<(), StoreError> {
        self.collection.insert_one(&record).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoRecord>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoRecord>, StoreError> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    async fn update_by_id(&self, id: TodoId, patch: TodoPatch) -> Result<TodoRecord, StoreError> {
        // `$set` with no fields is rejected by the server.
        let updated = if patch.is_empty() {
            self.collection.find_one(by_id(id)).await?
        } else {
            self.collection
                .find_one_and_update(by_id(id), doc! { "$set": set_fields(&patch) })
                .return_document(ReturnDocument::After)
                .await?
        };
        updated.ok_or(StoreError::NotFound { id })
    }

    async fn remove_by_id(&self, id: TodoId) -> Result<(), StoreError> {
        let result = self.collection.delete_one(by_id(id)).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_local_deployment() {
        let config = MongoConfig::default();
        assert_eq!(config.uri(), "mongodb://localhost:27017");
        assert_eq!(config.database, "demo_todo");
        assert_eq!(config.collection, "todo");
    }

    #[test]
    fn set_fields_contains_only_present_fields() {
        let set = set_fields(&TodoPatch {
            title: None,
            completed: Some(true),
        });
        assert_eq!(set, doc! { "completed": true });

        let set = set_fields(&TodoPatch {
            title: Some("Walk dog".to_string()),
            completed: Some(false),
        });
        assert_eq!(set, doc! { "title": "Walk dog", "completed": false });
    }

    #[test]
    fn filter_uses_native_object_id() {
        let id = TodoId::generate();
        let filter = by_id(id);
        assert_eq!(filter.get_object_id("_id").unwrap(), id.as_object_id());
    }
}
