// src/errors.rs

//! Crate-wide error type and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CronpushError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Project root does not exist or is not a directory: {}", .0.display())]
    ProjectRootMissing(PathBuf),

    #[error("Another invocation holds the run lock at {}", .0.display())]
    LockHeld(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CronpushError>;
