//! Core dictionary type and its builder.

use crate::error::{Error, Result};
use crate::options::Options;
use crate::persist::{atomic_write, direct_write, read};
use crate::serializer::{JsonSerializer, Serializer};
use crate::value::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A string-keyed map of [`Value`]s mirrored to a JSON file.
///
/// Nothing touches the disk until you call [`save`](Self::save) or
/// [`load`](Self::load), unless autosave is on, in which case every mutating
/// call saves before it returns. Reads never do I/O.
///
/// If an autosave fails, the in-memory change has already been applied; the
/// file keeps its previous content and the error is returned.
pub struct JsonDict {
    data: BTreeMap<String, Value>,
    path: PathBuf,
    options: Options,
    serializer: JsonSerializer,
}

impl JsonDict {
    /// Empty dictionary backed by `path`, with default [`Options`]. Does not
    /// read the file; call [`load`](Self::load) for that.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::builder(path).build()
    }

    /// Empty dictionary backed by `path` with the given options.
    pub fn with_options(path: impl AsRef<Path>, options: Options) -> Self {
        Self::builder(path).options(options).build()
    }

    /// Default options, then load `path` if it exists. A missing file just
    /// gives an empty dictionary.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).open()
    }

    /// Start configuring a new dictionary.
    pub fn builder(path: impl AsRef<Path>) -> JsonDictBuilder {
        JsonDictBuilder::new(path)
    }

    // ---- reads ----

    /// Value for `key`, or `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// `true` if the key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.data.iter()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.data.keys()
    }

    /// Values in key order.
    pub fn values(&self) -> btree_map::Values<'_, String, Value> {
        self.data.values()
    }

    /// Path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file is gzip-compressed.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.options.compress
    }

    /// Whether mutations save immediately.
    #[must_use]
    pub fn is_autosave(&self) -> bool {
        self.options.autosave
    }

    /// The options this dictionary was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    // ---- writes ----

    /// Set `key` to `value`, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let prev = self.data.insert(key.into(), value.into());
        self.after_mutation()?;
        Ok(prev)
    }

    /// Merge in all pairs from `iter`, overwriting existing keys. Saves once at
    /// the end, not per entry.
    pub fn update<I, K, V>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.data.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.after_mutation()
    }

    /// Remove `key`, returning its value. Removing a missing key is a no-op
    /// and doesn't trigger an autosave.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        let prev = self.data.remove(key);
        if prev.is_some() {
            self.after_mutation()?;
        }
        Ok(prev)
    }

    /// Drop all entries.
    pub fn clear(&mut self) -> Result<()> {
        self.data.clear();
        self.after_mutation()
    }

    /// Edit the value at `key` in place. Returns `false` (and does nothing)
    /// if the key doesn't exist.
    pub fn update_with<F>(&mut self, key: &str, f: F) -> Result<bool>
    where
        F: FnOnce(&mut Value),
    {
        match self.data.get_mut(key) {
            Some(v) => {
                f(v);
                self.after_mutation()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Return the value at `key`, inserting `f()` first if it's missing.
    pub fn get_or_insert_with<F, V>(&mut self, key: impl Into<String>, f: F) -> Result<&Value>
    where
        F: FnOnce() -> V,
        V: Into<Value>,
    {
        let key = key.into();
        if !self.data.contains_key(&key) {
            self.data.insert(key.clone(), f().into());
            self.after_mutation()?;
        }
        Ok(&self.data[&key])
    }

    // ---- persistence ----

    /// Replace the in-memory contents with what's on disk.
    ///
    /// Fails with [`Error::NotFound`] if the file is missing and
    /// [`Error::Parse`] if it isn't a JSON object. On failure the current
    /// contents are kept.
    pub fn load(&mut self) -> Result<()> {
        let bytes = read(&self.path, self.options.compress)?;
        self.data = self.serializer.deserialize(&bytes)?;
        debug!(
            path = %self.path.display(),
            entries = self.data.len(),
            compress = self.options.compress,
            "loaded"
        );
        Ok(())
    }

    /// Write the current contents to disk. With the default options this is
    /// all-or-nothing: either the whole file is replaced or it's untouched.
    pub fn save(&self) -> Result<()> {
        let bytes = self.serializer.serialize(&self.data)?;
        if self.options.atomic {
            atomic_write(&self.path, &bytes, self.options.compress)?;
        } else {
            direct_write(&self.path, &bytes, self.options.compress)?;
        }
        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            compress = self.options.compress,
            atomic = self.options.atomic,
            "saved"
        );
        Ok(())
    }

    /// The document [`save`](Self::save) would write, before compression.
    pub fn to_json_string(&self) -> Result<String> {
        let bytes = self.serializer.serialize(&self.data)?;
        String::from_utf8(bytes).map_err(|e| Error::Encode(e.to_string()))
    }

    // ---- internal ----

    fn after_mutation(&self) -> Result<()> {
        if self.options.autosave {
            self.save()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for JsonDict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonDict")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

/// Same text as [`to_json_string`](JsonDict::to_json_string). If a value
/// can't be encoded, prints `<unencodable: ...>` instead.
impl std::fmt::Display for JsonDict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_json_string() {
            Ok(json) => f.write_str(&json),
            Err(e) => write!(f, "<unencodable: {e}>"),
        }
    }
}

/// Compares contents only; path and options are ignored.
impl PartialEq for JsonDict {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// Panics if the key is missing, like `HashMap`.
impl std::ops::Index<&str> for JsonDict {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.data.get(key) {
            Some(v) => v,
            None => panic!("key {key:?} not found in {}", self.path.display()),
        }
    }
}

impl<'a> IntoIterator for &'a JsonDict {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and creates a [`JsonDict`].
///
/// ```rust,no_run
/// use json_dict::JsonDict;
///
/// let mut db = JsonDict::builder("var/state.json.gz")
///     .detect_compression()
///     .autosave(true)
///     .open()
///     .unwrap();
/// db.insert("runs", 1).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonDictBuilder {
    path: PathBuf,
    options: Options,
}

impl JsonDictBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: Options::default(),
        }
    }

    /// Gzip the file (default: `false`).
    pub fn compress(mut self, yes: bool) -> Self {
        self.options.compress = yes;
        self
    }

    /// Compress if and only if the file name ends in `.gz`.
    pub fn detect_compression(mut self) -> Self {
        self.options.compress = self.path.extension().is_some_and(|ext| ext == "gz");
        self
    }

    /// Save after every mutation (default: `false`).
    pub fn autosave(mut self, yes: bool) -> Self {
        self.options.autosave = yes;
        self
    }

    /// Write via temp file + rename (default: `true`). Turning this off
    /// rewrites the file in place.
    pub fn atomic(mut self, yes: bool) -> Self {
        self.options.atomic = yes;
        self
    }

    /// Indented output (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.options.pretty = yes;
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Create an empty dictionary. Doesn't touch the disk.
    pub fn build(self) -> JsonDict {
        let serializer = if self.options.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::compact()
        };
        JsonDict {
            data: BTreeMap::new(),
            path: self.path,
            options: self.options,
            serializer,
        }
    }

    /// Create the dictionary and load the file if there is one.
    pub fn open(self) -> Result<JsonDict> {
        let mut dict = self.build();
        match dict.load() {
            Ok(()) | Err(Error::NotFound(_)) => Ok(dict),
            Err(e) => Err(e),
        }
    }
}
