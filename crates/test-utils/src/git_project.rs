//! GitProject / BareRemote helpers for integration tests.
//!
//! Provide a temporary git working copy, optionally wired to a bare
//! repository acting as the push target. Both are cleaned up on drop.

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// A temporary git working copy for testing pipeline runs.
pub struct GitProject {
    dir: TempDir,
}

impl GitProject {
    /// Create a fresh repository on branch `main` with commit identity
    /// configured.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let project = Self { dir };

        project.git(&["init"]);
        project.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        project.git(&["config", "user.name", "cronpush-test"]);
        project.git(&["config", "user.email", "cronpush-test@example.invalid"]);
        project.git(&["config", "commit.gpgsign", "false"]);

        project
    }

    /// Create a new GitProject with `origin` already pointing at `remote`.
    pub fn with_remote(remote: &BareRemote) -> Self {
        let project = Self::new();
        project.git(&["remote", "add", "origin", &remote.url()]);
        project
    }

    /// Path to the repository root.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Execute a git command in this repository.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit
    /// code.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute git command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Execute a git command, returning Result instead of panicking.
    ///
    /// Use this when testing error cases or when failure is expected.
    pub fn git_result(&self, args: &[&str]) -> Result<String, String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute git command");

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).into_owned())
        }
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Read a file from the repository.
    ///
    /// Returns an empty string if the file does not exist.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name)).unwrap_or_default()
    }

    /// Subject line of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.git(&["log", "-1", "--format=%s"]).trim().to_string()
    }

    /// Number of commits reachable from HEAD (0 for an empty repository).
    pub fn commit_count(&self) -> usize {
        match self.git_result(&["rev-list", "--count", "HEAD"]) {
            Ok(out) => out.trim().parse().unwrap_or(0),
            Err(_) => 0,
        }
    }
}

impl Default for GitProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A bare git repository for use as a push target in tests.
pub struct BareRemote {
    dir: TempDir,
}

impl BareRemote {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");

        let output = Command::new("git")
            .args(["init", "--bare"])
            .current_dir(dir.path())
            .output()
            .expect("Failed to execute git init --bare");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("git init --bare failed: {}", stderr);
        }

        Self { dir }
    }

    /// URL (path) of this remote repository.
    pub fn url(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Subject line of the tip commit of `branch`, or `None` if the branch
    /// does not exist on the remote.
    pub fn head_message(&self, branch: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["log", "-1", "--format=%s", branch])
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute git log");

        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            None
        }
    }

    /// Whether `branch` exists on the remote.
    pub fn has_branch(&self, branch: &str) -> bool {
        Command::new("git")
            .args(["show-ref", "--verify", &format!("refs/heads/{branch}")])
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute git show-ref")
            .status
            .success()
    }
}

impl Default for BareRemote {
    fn default() -> Self {
        Self::new()
    }
}
