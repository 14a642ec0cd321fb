//! Serialization layer for collection documents. Defaults to JSON via serde_json.
//!
//! Implement [`Serializer`] if you need a different on-disk format.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Converts a collection to/from the bytes of its backing document.
pub trait Serializer: Send + Sync {
    /// Encode the full collection.
    fn serialize<T: Serialize>(&self, records: &[T]) -> Result<Vec<u8>>;

    /// Decode a document back into the collection.
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>>;
}

/// JSON serializer, a single top-level array of records.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed JSON, two-space indent. Diffs nicely under version control.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether output is indented.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, records: &[T]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(records)
        } else {
            serde_json::to_vec(records)
        };
        bytes.map_err(|e| Error::Serialize(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>> {
        serde_json::from_slice(bytes).map_err(|e| Error::Deserialize(e.to_string()))
    }
}
