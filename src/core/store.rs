//! core::store
//!
//! File-backed TOML document store with dotted-path access.
//!
//! # Architecture
//!
//! A [`TomlStore`] owns one backing file path and one [`MissingKeyPolicy`].
//! It caches nothing: every read parses the whole file and every write
//! serializes the whole document, so the file is the single source of truth
//! and external edits are visible on the next call.
//!
//! # Invariants
//!
//! - A leaf (scalar or array) is never replaced by a table or vice versa
//! - A failed write leaves the file unchanged
//! - Writes are atomic (temp file + rename) and serialized across processes
//!   by a [`StoreLock`]
//! - `load(dump(d)) == d` for every document TOML can represent
//!
//! # Example
//!
//! ```no_run
//! use nexus::core::store::{MissingKeyPolicy, TomlStore};
//! use nexus::core::types::DottedKey;
//!
//! let store = TomlStore::open("settings.toml", true, MissingKeyPolicy::Error)?;
//! let key = DottedKey::new("cli.color_palette").unwrap();
//!
//! if store.contains(&key)? {
//!     println!("{:?}", store.get(&key)?);
//! }
//! # Ok::<(), nexus::core::store::StoreError>(())
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::lock::{LockError, StoreLock};
use crate::core::types::{is_mapping, kind_name, Document, DottedKey, Value};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid configuration file '{path}': expected a '.toml' file, found '{extension}'")]
    InvalidFormat { path: PathBuf, extension: String },

    #[error("failed to parse configuration file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("key not found: '{key}'")]
    KeyNotFound { key: DottedKey },

    #[error("cannot replace {existing} at '{key}' with {requested}: a value must keep its table/non-table kind")]
    TypeMismatch {
        key: DottedKey,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("invalid missing key policy: '{0}'")]
    InvalidPolicy(String),

    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write configuration file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(String),

    #[error(transparent)]
    Lock(#[from] LockError),
}

impl StoreError {
    /// Whether the error means the backing file itself is unusable.
    ///
    /// Callers typically answer these by regenerating the file.
    pub fn is_corrupt_file(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidFormat { .. } | StoreError::Parse { .. }
        )
    }
}

/// How a lookup reacts to a path that does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Fail with [`StoreError::KeyNotFound`].
    #[default]
    Error,
    /// Return `None`.
    ReturnNone,
}

impl FromStr for MissingKeyPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(MissingKeyPolicy::Error),
            "return_none" => Ok(MissingKeyPolicy::ReturnNone),
            _ => Err(StoreError::InvalidPolicy(s.to_string())),
        }
    }
}

/// Result of resolving a dotted path, before any policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The path resolved to this value.
    Found(Value),
    /// A segment was absent or an intermediate segment was not a table.
    Missing,
}

/// A TOML document persisted as a single file.
#[derive(Debug, Clone)]
pub struct TomlStore {
    path: PathBuf,
    policy: MissingKeyPolicy,
}

impl TomlStore {
    /// The only supported file extension.
    pub const EXTENSION: &'static str = "toml";

    /// Bind a store to `path` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidFormat` if `path` does not end in `.toml`.
    pub fn new(path: impl Into<PathBuf>, policy: MissingKeyPolicy) -> Result<Self, StoreError> {
        let path = path.into();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        if extension != Self::EXTENSION {
            return Err(StoreError::InvalidFormat { path, extension });
        }

        Ok(Self { path, policy })
    }

    /// Bind a store to `path`, creating an empty file if asked to.
    pub fn open(
        path: impl Into<PathBuf>,
        create_if_not_exists: bool,
        policy: MissingKeyPolicy,
    ) -> Result<Self, StoreError> {
        let store = Self::new(path, policy)?;
        if create_if_not_exists && !store.exists() {
            store.create()?;
        }
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The policy applied by [`TomlStore::get`].
    pub fn policy(&self) -> MissingKeyPolicy {
        self.policy
    }

    /// True iff the backing path exists and is a regular file.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create parent directories and an empty backing file. Idempotent.
    pub fn create(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;

        debug!(path = %self.path.display(), "created configuration file");
        Ok(())
    }

    /// Remove the backing file. Missing files are not an error.
    pub fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "deleted configuration file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_error(e)),
        }
    }

    /// Parse the whole backing file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Read`] if the file cannot be read
    /// - [`StoreError::Parse`] if the file is not valid TOML
    pub fn load(&self) -> Result<Document, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// The full document. Equivalent to [`TomlStore::load`].
    pub fn to_document(&self) -> Result<Document, StoreError> {
        self.load()
    }

    /// Replace the file's content with `doc`.
    pub fn dump(&self, doc: &Document) -> Result<(), StoreError> {
        let _lock = StoreLock::acquire(&self.path)?;
        self.write_atomic(doc)
    }

    /// Load, transform and write back the document under the writer lock.
    ///
    /// If `f` fails nothing is written.
    pub fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(Document) -> Result<Document, StoreError>,
    {
        let _lock = StoreLock::acquire(&self.path)?;
        let current = self.load()?;
        let next = f(current)?;
        self.write_atomic(&next)
    }

    /// Resolve `key` without applying the missing key policy.
    pub fn lookup(&self, key: &DottedKey) -> Result<Lookup, StoreError> {
        let doc = self.load()?;
        Ok(match resolve(&doc, key) {
            Some(value) => Lookup::Found(value.clone()),
            None => Lookup::Missing,
        })
    }

    /// Get the value at `key`.
    ///
    /// The value may be a scalar, an array or a whole sub-table. If the path
    /// does not resolve, the store's policy decides: `Error` fails with
    /// [`StoreError::KeyNotFound`], `ReturnNone` yields `Ok(None)`.
    pub fn get(&self, key: &DottedKey) -> Result<Option<Value>, StoreError> {
        match self.lookup(key)? {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::Missing => match self.policy {
                MissingKeyPolicy::Error => Err(StoreError::KeyNotFound { key: key.clone() }),
                MissingKeyPolicy::ReturnNone => Ok(None),
            },
        }
    }

    /// Set, create, or (with `None`) delete the value at `key`.
    ///
    /// Every intermediate segment must already exist and be a table.
    /// Deleting a key that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// - [`StoreError::KeyNotFound`] if an intermediate segment is missing
    ///   or is not a table
    /// - [`StoreError::TypeMismatch`] if the new value would turn a table
    ///   into a leaf or a leaf into a table
    pub fn set(&self, key: &DottedKey, value: Option<Value>) -> Result<(), StoreError> {
        self.update(|mut doc| {
            let (parents, last) = key.split_last();

            let mut table = &mut doc;
            for segment in parents {
                table = table
                    .get_mut(segment)
                    .and_then(Value::as_table_mut)
                    .ok_or_else(|| StoreError::KeyNotFound { key: key.clone() })?;
            }

            match value {
                None => {
                    if table.contains_key(last) {
                        // Rebuild rather than remove so sibling order survives.
                        *table = std::mem::take(table)
                            .into_iter()
                            .filter(|(k, _)| k != last)
                            .collect();
                        debug!(%key, "removed key");
                    }
                }
                Some(value) => {
                    if let Some(existing) = table.get(last) {
                        if is_mapping(existing) != is_mapping(&value) {
                            return Err(StoreError::TypeMismatch {
                                key: key.clone(),
                                existing: kind_name(existing),
                                requested: kind_name(&value),
                            });
                        }
                    }
                    table.insert(last.to_string(), value);
                    debug!(%key, "set key");
                }
            }

            Ok(doc)
        })
    }

    /// Whether `key` resolves. Never applies the missing key policy.
    ///
    /// A store whose file does not exist contains nothing.
    pub fn contains(&self, key: &DottedKey) -> Result<bool, StoreError> {
        if !self.exists() {
            return Ok(false);
        }
        Ok(matches!(self.lookup(key)?, Lookup::Found(_)))
    }

    /// Every dotted key in the document, depth first.
    ///
    /// Parents come before their children; siblings keep their stored
    /// order. With `leaves_only`, keys naming tables are left out.
    pub fn keys(&self, leaves_only: bool) -> Result<Vec<DottedKey>, StoreError> {
        let doc = self.load()?;
        let mut keys = Vec::new();
        collect_keys(&doc, None, leaves_only, &mut keys);
        Ok(keys)
    }

    fn write_atomic(&self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let contents =
            toml::to_string_pretty(doc).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let temp_path = self.path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| StoreError::Write {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| StoreError::Write {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| StoreError::Write {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;

        debug!(path = %self.path.display(), keys = doc.len(), "wrote configuration file");
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Walk `doc` along `key`. `None` if any segment is absent or an
/// intermediate value is not a table.
pub fn resolve<'a>(doc: &'a Document, key: &DottedKey) -> Option<&'a Value> {
    let (parents, last) = key.split_last();
    let mut table = doc;
    for segment in parents {
        table = table.get(segment)?.as_table()?;
    }
    table.get(last)
}

fn collect_keys(
    table: &Document,
    parent: Option<&DottedKey>,
    leaves_only: bool,
    out: &mut Vec<DottedKey>,
) {
    for (name, value) in table {
        // A quoted TOML key containing '.' (or an empty one) has no dotted path.
        let key = match DottedKey::child(parent, name) {
            Ok(key) if !name.contains(DottedKey::SEPARATOR) => key,
            _ => {
                warn!(key = %name, "skipping key that cannot be addressed by a dotted path");
                continue;
            }
        };

        match value {
            Value::Table(child) => {
                if !leaves_only {
                    out.push(key.clone());
                }
                collect_keys(child, Some(&key), leaves_only, out);
            }
            _ => out.push(key),
        }
    }
}
