//! A dictionary that persists itself to a JSON file.
//!
//! Keys are strings, values are JSON plus dates and UTC datetimes. Saves are
//! atomic (temp file + rename), pretty-printed with sorted keys, and can be
//! gzip-compressed. Turn on autosave and every mutation hits the disk before
//! it returns.
//!
//! ```rust,no_run
//! use json_dict::{JsonDict, Value};
//! use chrono::NaiveDate;
//!
//! let created = NaiveDate::from_ymd_opt(2013, 1, 27)
//!     .unwrap()
//!     .and_hms_opt(21, 14, 0)
//!     .unwrap();
//!
//! let mut db = JsonDict::new("var/test.json");
//! db.update([
//!     ("b", Value::from(2)),
//!     ("created", Value::from(created)),
//!     ("a", Value::from(1)),
//! ])
//! .unwrap();
//! db.save().unwrap();
//! // {
//! //   "a": 1,
//! //   "b": 2,
//! //   "created": "2013-01-27T21:14:00Z"
//! // }
//! ```
//!
//! **Single-process only.** Saves never tear, but two processes writing the
//! same file will overwrite each other's changes (last rename wins).

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod dict;
pub mod error;
pub mod options;
pub mod persist;
pub mod serializer;
pub mod value;

pub use chrono;
pub use dict::{JsonDict, JsonDictBuilder};
pub use error::{Error, Result};
pub use options::Options;
pub use serializer::{JsonSerializer, Serializer};
pub use value::Value;
