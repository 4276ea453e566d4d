//! Serialization layer. Defaults to pretty-printed JSON via serde_json.
//!
//! Implement [`Serializer`] if you need a different layout; compression is
//! applied afterwards by the persistence layer, so it works with any
//! serializer.

use crate::error::{Error, Result};
use crate::value::Value;
use std::collections::BTreeMap;

/// Converts dictionary snapshots to/from bytes for persistence.
pub trait Serializer {
    /// Encode the map to bytes. Keys come out in the map's (sorted) order.
    fn serialize(&self, data: &BTreeMap<String, Value>) -> Result<Vec<u8>>;

    /// Decode bytes back into a map. The document must be a JSON object.
    fn deserialize(&self, bytes: &[u8]) -> Result<BTreeMap<String, Value>>;
}

/// JSON serializer, pretty (2-space indent) unless told otherwise.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Pretty-printed JSON with 2-space indentation. This is the default.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether output is indented.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, data: &BTreeMap<String, Value>) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(data)
        } else {
            serde_json::to_vec(data)
        };
        bytes.map_err(Error::from)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<BTreeMap<String, Value>> {
        // Top-level arrays and scalars land here too.
        serde_json::from_slice(bytes).map_err(|e| Error::Parse(e.to_string()))
    }
}
