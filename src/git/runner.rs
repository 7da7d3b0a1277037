// src/git/runner.rs

//! Synchronous runner for git commands.
//!
//! Every operation shells out to `git -C <repo_root> ...` and captures the
//! full output. Failure classification is pattern-based on git's own
//! diagnostics, which are stable enough for the few cases we care about.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::GitError;

const GIT_COMMAND: &str = "git";

/// stderr pattern for running outside a working copy.
const NOT_A_REPO_PATTERN: &str = "not a git repository";

/// Output patterns for a commit with no staged changes. git prints these on
/// stdout and exits non-zero; the exact phrasing varies with the state of
/// the working tree.
const NOTHING_TO_COMMIT_PATTERNS: &[&str] = &[
    "nothing to commit",
    "nothing added to commit",
    "no changes added to commit",
];

/// Executor for git commands against a fixed repository root.
#[derive(Debug, Clone)]
pub struct GitRunner {
    repo_root: PathBuf,
}

impl GitRunner {
    pub fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Run a git command with the given arguments and return its stdout.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = Command::new(GIT_COMMAND);
        cmd.arg("-C").arg(&self.repo_root);
        cmd.args(args);

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::GitNotFound
            } else {
                GitError::IoError(e)
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code().unwrap_or(-1);

        if stderr.contains(NOT_A_REPO_PATTERN) {
            return Err(GitError::NotARepository);
        }
        if is_nothing_to_commit(&stdout, &stderr) {
            return Err(GitError::NothingToCommit);
        }

        Err(GitError::CommandFailed { stderr, exit_code })
    }

    /// `git remote -v`: the configured remotes, verbose form.
    pub fn remotes(&self) -> Result<String, GitError> {
        self.run(&["remote", "-v"])
    }

    /// `git add -- <path>`: stage a single file.
    pub fn stage(&self, path: &Path) -> Result<(), GitError> {
        let path = path.to_string_lossy();
        self.run(&["add", "--", &path])?;
        Ok(())
    }

    /// `git commit -m <message>`.
    ///
    /// Returns [`GitError::NothingToCommit`] when the staged content matches
    /// the previous commit.
    pub fn commit(&self, message: &str) -> Result<String, GitError> {
        self.run(&["commit", "-m", message])
    }

    /// `git push <remote> <branch>`.
    pub fn push(&self, remote: &str, branch: &str) -> Result<String, GitError> {
        self.run(&["push", remote, branch])
    }
}

fn is_nothing_to_commit(stdout: &str, stderr: &str) -> bool {
    NOTHING_TO_COMMIT_PATTERNS
        .iter()
        .any(|p| stdout.contains(p) || stderr.contains(p))
}
