//! What a storable record looks like, and partial updates to one.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A record that can live in a collection.
///
/// Records are plain data. The store clones them out on every read and never
/// mutates them in place; updates produce a new value via [`Patch::apply`].
/// The remote table keys row-scoped requests by [`id`](Record::id), so every
/// record needs a stable string id generated by the caller before `create`.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Unique id of this record within its collection.
    fn id(&self) -> &str;
}

/// A partial set of fields to overlay on an existing record.
///
/// Built from anything that serializes to a JSON object. Fields the source
/// omits (e.g. `None` with `skip_serializing_if`) are left untouched on merge;
/// fields it carries replace the stored value wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: Map<String, Value>,
}

impl Patch {
    /// Empty patch. Applying it returns the record unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a patch from a serializable value. Must encode as a JSON object.
    pub fn from_fields<P: Serialize>(fields: &P) -> Result<Self> {
        match serde_json::to_value(fields).map_err(|e| Error::Serialize(e.to_string()))? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::Serialize(format!(
                "patch must be a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Set a single field, builder style.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// `true` when the patch carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The raw field overrides, as sent over the wire.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Overlay the patch on `record` and decode the result. New values win,
    /// unspecified fields are retained. Fails if the merged object no longer
    /// decodes as `T` (wrong type for a field, etc.).
    pub fn apply<T: Record>(&self, record: &T) -> Result<T> {
        let mut merged = match serde_json::to_value(record)
            .map_err(|e| Error::Serialize(e.to_string()))?
        {
            Value::Object(map) => map,
            other => {
                return Err(Error::Serialize(format!(
                    "record must be a JSON object, got {}",
                    kind_of(&other)
                )))
            }
        };
        for (k, v) in &self.fields {
            merged.insert(k.clone(), v.clone());
        }
        serde_json::from_value(Value::Object(merged)).map_err(|e| Error::Deserialize(e.to_string()))
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
