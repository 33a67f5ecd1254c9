//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the variable library to do the work
//! 3. Formats and displays output
//!
//! Handlers never touch the configuration file directly.

mod completion;
mod config_cmd;

// Re-export command functions for testing and direct invocation
pub use completion::{completion, completion_to};
pub use config_cmd::{
    get as config_get, list as config_list, parse_value, path as config_path,
    reset as config_reset, set as config_set, ListOptions,
};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value, force } => config_cmd::set(ctx, &key, &value, force),
            ConfigAction::List {
                key,
                keys,
                leaves,
                json,
            } => config_cmd::list(
                ctx,
                key.as_deref(),
                ListOptions {
                    keys,
                    leaves_only: leaves,
                    json,
                },
            ),
            ConfigAction::Reset { force } => config_cmd::reset(ctx, force),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
