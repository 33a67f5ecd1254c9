//! core::paths
//!
//! Centralized path routing for Nexus storage locations.
//!
//! # Storage Layout
//!
//! All per-user Nexus data is stored under one root directory:
//! - `config/variables.toml` - The variable configuration
//! - `config/variables.toml.lock` - Writer lock for the variable configuration
//!
//! # Root Resolution
//!
//! 1. `$NEXUS_HOME` if set and non-empty
//! 2. `~/.nexus` (canonical location)
//!
//! # Example
//!
//! ```
//! use nexus::core::paths::NexusPaths;
//! use std::path::PathBuf;
//!
//! let paths = NexusPaths::new(PathBuf::from("/home/me/.nexus"));
//!
//! assert_eq!(
//!     paths.variables_path(),
//!     PathBuf::from("/home/me/.nexus/config/variables.toml")
//! );
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable overriding the Nexus root directory.
pub const NEXUS_HOME_ENV: &str = "NEXUS_HOME";

/// Errors from path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("home directory not found")]
    NoHomeDir,
}

/// Centralized path routing for Nexus storage.
///
/// No code outside this module should compute `*.join(".nexus")` paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexusPaths {
    root: PathBuf,
}

impl NexusPaths {
    /// Create paths rooted at an explicit directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the per-user root directory.
    ///
    /// # Errors
    ///
    /// Returns `PathError::NoHomeDir` if neither `$NEXUS_HOME` nor a home
    /// directory is available.
    pub fn discover() -> Result<Self, PathError> {
        Self::resolve(std::env::var_os(NEXUS_HOME_ENV), dirs::home_dir())
    }

    fn resolve(override_root: Option<OsString>, home: Option<PathBuf>) -> Result<Self, PathError> {
        if let Some(root) = override_root.filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(root)));
        }

        let home = home.ok_or(PathError::NoHomeDir)?;
        Ok(Self::new(home.join(".nexus")))
    }

    /// Directory holding configuration files.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    /// The variable configuration file.
    pub fn variables_path(&self) -> PathBuf {
        self.config_dir().join("variables.toml")
    }
}
