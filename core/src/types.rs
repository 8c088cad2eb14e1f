//! Wire and persisted forms of a todo, and the mapping between them.
//!
//! # Design
//! `Todo` is what clients send and receive: the id is a plain string, empty
//! on create requests. `TodoRecord` is what the store holds: the id is a
//! native `TodoId` stored as `_id`. The two conversions are pure and copy
//! every other field unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::TodoId;

/// A todo as seen on the wire.
///
/// Every field has a decode default so a create request only needs a title:
/// a missing `createdAt` is stamped with the current time and any
/// client-supplied `id` is discarded by [`TodoRecord::from_wire`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A todo as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

impl TodoRecord {
    /// Build the record for a validated wire todo and a freshly generated id.
    pub fn from_wire(todo: Todo, id: TodoId) -> Self {
        Self {
            id,
            title: todo.title,
            completed: todo.completed,
            created_at: todo.created_at,
        }
    }

    /// Build the response-facing todo.
    pub fn into_wire(self) -> Todo {
        Todo {
            id: self.id.to_external(),
            title: self.title,
            completed: self.completed,
            created_at: self.created_at,
        }
    }

    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        record.into_wire()
    }
}

/// Partial update for an existing todo. Only the fields present in the JSON
/// are applied; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}
