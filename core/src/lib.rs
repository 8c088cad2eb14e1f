//! Domain core for the todo service.
//!
//! # Overview
//! Holds everything below the HTTP layer: identifier encoding, the wire and
//! persisted forms of a todo with the mapping between them, and the store
//! gateways that own persisted records.
//!
//! # Design
//! - `TodoId` wraps a MongoDB `ObjectId`; clients see its 24-digit hex form.
//! - `Todo` (wire) and `TodoRecord` (persisted) convert through pure
//!   functions; only the id representation differs.
//! - `TodoStore` is an async trait so the HTTP layer can run against MongoDB
//!   in production and an in-memory map in tests.

pub mod error;
pub mod id;
pub mod store;
pub mod types;

pub use error::{InvalidIdentifier, StoreError};
pub use id::TodoId;
pub use store::{MemoryStore, MongoConfig, MongoStore, TodoStore};
pub use types::{Todo, TodoPatch, TodoRecord};
