//! Construction options.

use serde::{Deserialize, Serialize};

/// Controls how a [`JsonDict`](crate::JsonDict) talks to disk.
///
/// Deserializable so it can live inside a host application's own config
/// file; every field is optional there and falls back to its default.
///
/// ```rust
/// let opts: json_dict::Options = serde_json::from_str(r#"{"autosave": true}"#).unwrap();
/// assert!(opts.autosave);
/// assert!(!opts.compress);
/// assert!(opts.atomic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Gzip the file contents. Default: `false`.
    pub compress: bool,
    /// Save after every insert/update/remove/clear. Default: `false`.
    pub autosave: bool,
    /// Write through a temp file + rename instead of in place. Default: `true`.
    pub atomic: bool,
    /// Indent the JSON with two spaces. Default: `true`.
    pub pretty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            compress: false,
            autosave: false,
            atomic: true,
            pretty: true,
        }
    }
}
