//! core::variables
//!
//! The variable library: the user's global Nexus configuration.
//!
//! # Overview
//!
//! A [`VariableLibrary`] owns one [`TomlStore`] bound to the well-known
//! per-user file (`~/.nexus/config/variables.toml`) and a built-in default
//! document. It is constructed once at process start and handed by
//! reference to whatever needs configuration.
//!
//! # Lazy Initialization
//!
//! [`VariableLibrary::new`] only binds the path. The first call that reads
//! or writes variables runs `generate(false)` once, so a fresh machine gets
//! a populated file on first use. [`VariableLibrary::open`] does the same
//! eagerly. Threads sharing one library that race on first use wait for a
//! single generation.
//!
//! # Defaults
//!
//! [`VariableLibrary::generate`] layers the defaults under the existing
//! file with [`deep_merge`]. Values the user already customized always win,
//! newly introduced default keys are added, and running it twice changes
//! nothing. With `regenerate` the file is deleted first and rewritten with
//! the defaults alone.
//!
//! # Example
//!
//! ```no_run
//! use nexus::core::paths::NexusPaths;
//! use nexus::core::types::DottedKey;
//! use nexus::core::variables::VariableLibrary;
//!
//! let library = VariableLibrary::open(&NexusPaths::discover().unwrap())?;
//! let palette = library.get_variable(&DottedKey::new("cli.color_palette").unwrap())?;
//! println!("palette: {}", palette);
//! # Ok::<(), nexus::core::store::StoreError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::core::merge::deep_merge;
use crate::core::paths::NexusPaths;
use crate::core::store::{MissingKeyPolicy, StoreError, TomlStore};
use crate::core::types::{Document, DottedKey, Value};

/// Global variable configuration backed by one TOML file.
#[derive(Debug)]
pub struct VariableLibrary {
    store: TomlStore,
    defaults: Document,
    /// Set once the defaults have been written. Held while generating.
    generated: Mutex<bool>,
}

impl VariableLibrary {
    /// Bind to the well-known location and bring the file up to date.
    ///
    /// Creates the file if absent and merges in any missing defaults.
    pub fn open(paths: &NexusPaths) -> Result<Self, StoreError> {
        let library = Self::new(paths.variables_path())?;
        library.generate(false)?;
        Ok(library)
    }

    /// Bind to `path` with the built-in defaults. Touches nothing on disk.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::with_defaults(path, Self::default_document())
    }

    /// Bind to `path` with a custom default document.
    pub fn with_defaults(path: impl Into<PathBuf>, defaults: Document) -> Result<Self, StoreError> {
        Ok(Self {
            store: TomlStore::new(path, MissingKeyPolicy::Error)?,
            defaults,
            generated: Mutex::new(false),
        })
    }

    /// The built-in default document.
    ///
    /// ```toml
    /// [cli]
    /// color_palette = "latte"
    ///
    /// [cli.rich]
    /// palette = "solarized"
    /// style = "box"
    ///
    /// [exceptions]
    /// show_locals = false
    /// ```
    pub fn default_document() -> Document {
        let mut rich = Document::new();
        rich.insert("palette".into(), Value::String("solarized".into()));
        rich.insert("style".into(), Value::String("box".into()));

        let mut cli = Document::new();
        cli.insert("color_palette".into(), Value::String("latte".into()));
        cli.insert("rich".into(), Value::Table(rich));

        let mut exceptions = Document::new();
        exceptions.insert("show_locals".into(), Value::Boolean(false));

        let mut doc = Document::new();
        doc.insert("cli".into(), Value::Table(cli));
        doc.insert("exceptions".into(), Value::Table(exceptions));
        doc
    }

    /// Write the defaults into the backing file.
    ///
    /// Without `regenerate`, existing values win over defaults at every
    /// level. With `regenerate`, the existing file is deleted and replaced
    /// by the defaults verbatim.
    pub fn generate(&self, regenerate: bool) -> Result<(), StoreError> {
        let mut generated = self.generation_guard();
        self.write_defaults(regenerate)?;
        *generated = true;
        Ok(())
    }

    fn ensure_generated(&self) -> Result<(), StoreError> {
        let mut generated = self.generation_guard();
        if !*generated {
            self.write_defaults(false)?;
            *generated = true;
        }
        Ok(())
    }

    fn generation_guard(&self) -> MutexGuard<'_, bool> {
        // A panic mid-generation leaves the flag unset, so the next caller retries.
        self.generated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_defaults(&self, regenerate: bool) -> Result<(), StoreError> {
        if regenerate {
            warn!(path = %self.path().display(), "resetting variable configuration");
            self.store.delete()?;
        }

        self.store.create()?;

        let defaults = self.defaults.clone();
        self.store.update(|current| {
            Ok(if regenerate {
                defaults
            } else {
                deep_merge(defaults, current)
            })
        })?;

        debug!(path = %self.path().display(), regenerate, "generated variable configuration");
        Ok(())
    }

    /// Get a variable. Fails with [`StoreError::KeyNotFound`] if absent.
    pub fn get_variable(&self, key: &DottedKey) -> Result<Value, StoreError> {
        self.ensure_generated()?;
        self.store
            .get(key)?
            .ok_or_else(|| StoreError::KeyNotFound { key: key.clone() })
    }

    /// Set a variable, or delete it with `None`.
    pub fn set_variable(&self, key: &DottedKey, value: Option<Value>) -> Result<(), StoreError> {
        self.ensure_generated()?;
        self.store.set(key, value)
    }

    /// The underlying store, for bulk reads.
    pub fn config(&self) -> Result<&TomlStore, StoreError> {
        self.ensure_generated()?;
        Ok(&self.store)
    }

    /// Whether the backing file currently exists.
    pub fn exists(&self) -> bool {
        self.store.exists()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}
