//! Todo identifiers.
//!
//! # Design
//! A `TodoId` wraps a MongoDB `ObjectId`, so the store can use it as the
//! native `_id` value. Clients only ever see the external form: the 24-digit
//! hex encoding of the 12 id bytes.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::InvalidIdentifier;

/// Length of the external (hex) form.
pub const EXTERNAL_LEN: usize = 24;

/// Identifier of a single todo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Generate a fresh, globally unique identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Encode as the string form returned to clients.
    pub fn to_external(&self) -> String {
        self.0.to_hex()
    }

    /// Whether `input` is a syntactically valid external id. Says nothing
    /// about whether a record with that id exists.
    pub fn is_valid_external(input: &str) -> bool {
        input.len() == EXTERNAL_LEN && input.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Decode an external id.
    pub fn from_external(input: &str) -> Result<Self, InvalidIdentifier> {
        if !Self::is_valid_external(input) {
            return Err(InvalidIdentifier {
                input: input.to_string(),
            });
        }
        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|_| InvalidIdentifier {
                input: input.to_string(),
            })
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for TodoId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_external())
    }
}

impl FromStr for TodoId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_external(s)
    }
}
