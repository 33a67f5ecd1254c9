//! cli
//!
//! Command-line interface layer for Nexus.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Build the [`Context`] once per process
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers read and write variables only through
//! the [`VariableLibrary`] held by the context; presentation decisions
//! (trees, suggestions, confirmations) stay here.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};

use crate::core::paths::NexusPaths;
use crate::core::variables::VariableLibrary;
use crate::ui::output::Verbosity;

/// Per-process state handed to every command.
#[derive(Debug)]
pub struct Context {
    /// Debug output enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
    /// The user's variable configuration.
    pub variables: VariableLibrary,
}

impl Context {
    /// Create a context bound to the variable file under `paths`.
    pub fn new(paths: &NexusPaths, debug: bool, quiet: bool, interactive: bool) -> Result<Self> {
        let variables = VariableLibrary::new(paths.variables_path())
            .context("Failed to bind variable configuration")?;
        Ok(Self {
            debug,
            quiet,
            interactive,
            variables,
        })
    }

    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let paths = NexusPaths::discover().context("Failed to locate the Nexus directory")?;
    let ctx = Context::new(&paths, cli.debug, cli.quiet, cli.interactive())?;

    commands::dispatch(cli.command, &ctx)
}
