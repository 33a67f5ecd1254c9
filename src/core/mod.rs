//! core
//!
//! Core domain types and the configuration store.
//!
//! # Modules
//!
//! - [`types`] - Strong types: DottedKey, Document, Value
//! - [`store`] - File-backed TOML document store with dotted-path access
//! - [`merge`] - Deep merge of defaults under existing documents
//! - [`lock`] - Writer lock serializing store mutations
//! - [`paths`] - Centralized path routing for Nexus storage
//! - [`variables`] - The variable library (global user configuration)
//!
//! # Design Principles
//!
//! - The backing file is the single source of truth; nothing is cached
//! - Errors are typed and never swallowed
//! - A value never silently changes between table and leaf

pub mod lock;
pub mod merge;
pub mod paths;
pub mod store;
pub mod types;
pub mod variables;
