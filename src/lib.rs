//! Nexus - A CLI with a hierarchical, file-backed variable configuration
//!
//! Nexus keeps its user-level settings in a single TOML file and exposes
//! them through dotted keys such as `cli.color_palette`.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to core)
//! - [`core`] - Document store, default merging, and the variable library
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Nexus maintains the following invariants:
//!
//! 1. A value never changes between table and leaf through `set`
//! 2. Regenerating defaults never overwrites a customized value
//! 3. Every write replaces the file atomically

pub mod cli;
pub mod core;
pub mod ui;
