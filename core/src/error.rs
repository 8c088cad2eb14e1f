//! Error types for the todo core.
//!
//! # Design
//! `NotFound` gets a dedicated variant because handlers answer it with 404
//! while every other store failure is a 500. `kind()` gives each variant a
//! stable tag so the wire payload does not depend on which driver produced
//! the error.

use thiserror::Error;

use crate::id::TodoId;

/// A string that is not a valid external todo id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid todo id {input:?}")]
pub struct InvalidIdentifier {
    pub input: String,
}

/// Errors surfaced by a [`TodoStore`](crate::store::TodoStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record carries the requested id.
    #[error("todo {id} not found")]
    NotFound { id: TodoId },

    /// The store could not be reached at startup.
    #[error("failed to connect to {host}: {message}")]
    Connect { host: String, message: String },

    /// Any other failure reported by the underlying store.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Stable tag used in JSON error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "not_found",
            StoreError::Connect { .. } => "connect",
            StoreError::Backend(_) => "store",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}
