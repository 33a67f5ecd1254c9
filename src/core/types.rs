//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`DottedKey`] - Validated period-separated path into a document
//! - [`Document`] - A nested key/value mapping (one TOML table)
//! - [`Value`] - Anything a document can hold: scalar, sequence, or mapping
//!
//! # Validation
//!
//! A [`DottedKey`] is validated at construction time. A key with an empty
//! segment (`"a..b"`, `".a"`, `"a."`) cannot be represented.
//!
//! # Examples
//!
//! ```
//! use nexus::core::types::DottedKey;
//!
//! let key = DottedKey::new("cli.rich.palette").unwrap();
//! assert_eq!(key.segments().collect::<Vec<_>>(), vec!["cli", "rich", "palette"]);
//!
//! assert!(DottedKey::new("cli..palette").is_err());
//! assert!(DottedKey::new("").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value stored in a document.
///
/// TOML covers every kind the store must round-trip: 64-bit integers,
/// floats, booleans, UTF-8 strings, offset timestamps, arrays and tables.
pub type Value = toml::Value;

/// A nested key/value mapping, preserving source insertion order.
pub type Document = toml::Table;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },
}

/// A validated dotted path such as `"a.b.c"`.
///
/// Denotes the lookup chain `doc["a"]["b"]["c"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DottedKey(String);

impl DottedKey {
    /// Separator between path segments.
    pub const SEPARATOR: char = '.';

    /// Create a new validated dotted key.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidKey` if the key is empty or contains an
    /// empty segment.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    fn validate(key: &str) -> Result<(), TypeError> {
        if key.is_empty() {
            return Err(TypeError::InvalidKey {
                key: key.to_string(),
                reason: "key cannot be empty",
            });
        }
        if key.split(Self::SEPARATOR).any(str::is_empty) {
            return Err(TypeError::InvalidKey {
                key: key.to_string(),
                reason: "key cannot contain an empty segment",
            });
        }
        Ok(())
    }

    /// Build a key from a parent key and one child segment.
    pub fn child(parent: Option<&DottedKey>, segment: &str) -> Result<Self, TypeError> {
        match parent {
            Some(parent) => Self::new(format!("{}{}{}", parent.0, Self::SEPARATOR, segment)),
            None => Self::new(segment),
        }
    }

    /// Iterate over the path segments, root first.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split(Self::SEPARATOR)
    }

    /// Split into the parent segments and the final segment.
    pub fn split_last(&self) -> (Vec<&str>, &str) {
        let mut parents: Vec<&str> = self.segments().collect();
        let last = parents.pop().unwrap_or(self.0.as_str());
        (parents, last)
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DottedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DottedKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DottedKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DottedKey {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DottedKey> for String {
    fn from(key: DottedKey) -> Self {
        key.0
    }
}

impl AsRef<str> for DottedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether a value is a nested mapping (as opposed to a leaf).
///
/// Leaves are scalars and sequences. `set` never lets one kind replace
/// the other.
pub fn is_mapping(value: &Value) -> bool {
    value.is_table()
}

/// Short human-readable name of a value's kind, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}
