// src/git/mod.rs

//! git command execution layer.
//!
//! Drives the `git` CLI as a subprocess and classifies its failures; git's
//! own semantics (what counts as a change, how pushes are transmitted) are
//! deliberately not reimplemented here.

pub mod runner;

pub use runner::GitRunner;

use std::io;

use thiserror::Error;

/// Errors that can occur when executing git commands.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("not a git repository")]
    NotARepository,

    #[error("nothing to commit (log content unchanged)")]
    NothingToCommit,

    #[error("git command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("git is not installed or not in PATH")]
    GitNotFound,
}
