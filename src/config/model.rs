// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Placeholder substituted with the current timestamp when the commit
/// message is rendered.
pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [project]
/// root = "/home/bot/project"
/// log_file = "cron.log"
///
/// [run]
/// command = "python3 script.py"
/// continue_on_failure = true
///
/// [git]
/// remote = "origin"
/// branch = "main"
/// message_template = "Cron: Updated log on {timestamp}"
/// ```
///
/// Only `[run].command` is required; everything else has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Paths from `[project]`.
    #[serde(default)]
    pub project: ProjectSection,

    /// The external command from `[run]`.
    pub run: RunSection,

    /// Version-control settings from `[git]`.
    #[serde(default)]
    pub git: GitSection,
}

impl ConfigFile {
    /// Path of the log file, resolved against the given project root.
    pub fn log_path(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, &self.project.log_file)
    }

    /// Path of the run-lock file, resolved against the given project root.
    pub fn lock_path(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, &self.project.lock_file)
    }
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Project directory holding the git working copy.
    ///
    /// Relative paths resolve against the config file's directory, so a
    /// config committed into the project itself can say `root = "."`.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Log file the external command's output is appended to.
    ///
    /// Relative to `root` unless absolute.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Lock file serializing concurrent invocations.
    ///
    /// Relative to `root` unless absolute.
    #[serde(default = "default_lock_file")]
    pub lock_file: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("cron.log")
}

fn default_lock_file() -> PathBuf {
    PathBuf::from(".cronpush.lock")
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            log_file: default_log_file(),
            lock_file: default_lock_file(),
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// The command to execute, run through the platform shell with the
    /// project root as working directory.
    pub command: String,

    /// Whether a non-zero exit from the command aborts the run.
    ///
    /// - `true` (default): the run proceeds to commit and push whatever
    ///   output the command managed to produce.
    /// - `false`: the run halts at the run-command stage.
    #[serde(default = "default_continue_on_failure")]
    pub continue_on_failure: bool,
}

fn default_continue_on_failure() -> bool {
    true
}

/// `[git]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GitSection {
    /// Remote the commit is pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch the commit is pushed to.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Commit message template; `{timestamp}` is replaced with the current
    /// local time at commit time.
    #[serde(default = "default_message_template")]
    pub message_template: String,

    /// strftime format used to render `{timestamp}`.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Whether to print `git remote -v` to stdout before running.
    #[serde(default = "default_show_remotes")]
    pub show_remotes: bool,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_message_template() -> String {
    format!("Cron: Updated log on {TIMESTAMP_PLACEHOLDER}")
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_show_remotes() -> bool {
    true
}

impl Default for GitSection {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: default_branch(),
            message_template: default_message_template(),
            timestamp_format: default_timestamp_format(),
            show_remotes: default_show_remotes(),
        }
    }
}
