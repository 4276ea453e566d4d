//! Unified error type for all dictionary operations.

/// Things that can go wrong when loading or saving a [`JsonDict`](crate::JsonDict).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `load()` was pointed at a file that doesn't exist.
    NotFound(String),
    /// File content is not valid JSON, not a JSON object, or not valid gzip.
    Parse(String),
    /// File system problem (read, write, rename, mkdir).
    Io(String),
    /// A value can't be written as JSON (e.g. a NaN float).
    Encode(String),
    /// Bad configuration (invalid path, etc.).
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "file not found: {msg}"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Encode(msg) => write!(f, "encoding error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Used on the encode path only; decoding maps its errors to
/// [`Error::Parse`] itself.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else {
            Error::Encode(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
