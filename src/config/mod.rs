// src/config/mod.rs

//! Configuration loading and validation for cronpush.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate invariants like a non-empty command and a well-formed
//!   commit-message template (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, GitSection, ProjectSection, RunSection, TIMESTAMP_PLACEHOLDER};
pub use validate::validate_config;
