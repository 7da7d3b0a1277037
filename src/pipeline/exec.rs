// src/pipeline/exec.rs

//! External command execution with output appended to the log file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Result of one external command run.
#[derive(Debug, Clone, Copy)]
pub struct ExecResult {
    /// Exit code of the command; `None` when terminated by a signal.
    pub exit_code: Option<i32>,

    /// Bytes appended to the log file by this run.
    pub bytes_appended: u64,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `command` through the platform shell with `cwd` as working directory,
/// appending its combined stdout/stderr stream to the log file at
/// `log_path`.
///
/// Both streams share the same appended file handle, so the bytes land in
/// the log interleaved as the command produced them, and nothing reaches
/// the console. The log file and its parent directory are created if
/// absent; the file is never truncated.
pub fn run_logged(command: &str, cwd: &Path, log_path: &Path) -> Result<ExecResult> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {parent:?}"))?;
    }

    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {log_path:?} for append"))?;

    let len_before = log
        .metadata()
        .with_context(|| format!("reading metadata of log file {log_path:?}"))?
        .len();

    let stderr_log = log
        .try_clone()
        .with_context(|| format!("duplicating log handle for {log_path:?}"))?;

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    cmd.current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(stderr_log));

    info!(cmd = %command, cwd = %cwd.display(), "starting external command");

    let status = cmd
        .status()
        .with_context(|| format!("spawning external command {command:?}"))?;

    let len_after = fs::metadata(log_path)
        .with_context(|| format!("reading metadata of log file {log_path:?}"))?
        .len();

    let result = ExecResult {
        exit_code: status.code(),
        bytes_appended: len_after.saturating_sub(len_before),
    };

    debug!(
        exit_code = ?result.exit_code,
        bytes_appended = result.bytes_appended,
        "external command exited"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_appended_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("cron.log");
        fs::write(&log, "existing line\n").unwrap();

        let result = run_logged("printf 'OK\\n'", dir.path(), &log).unwrap();

        assert!(result.success());
        assert_eq!(result.bytes_appended, 3);
        assert_eq!(fs::read_to_string(&log).unwrap(), "existing line\nOK\n");
    }

    #[test]
    fn test_stderr_is_captured_too() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("cron.log");

        let result =
            run_logged("printf 'ERROR: failed\\n' >&2; exit 1", dir.path(), &log).unwrap();

        assert_eq!(result.exit_code, Some(1));
        assert_eq!(fs::read_to_string(&log).unwrap(), "ERROR: failed\n");
    }

    #[test]
    fn test_log_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs").join("cron.log");

        let result = run_logged("printf 'OK\\n'", dir.path(), &log).unwrap();

        assert!(result.success());
        assert_eq!(fs::read_to_string(&log).unwrap(), "OK\n");
    }

    #[test]
    fn test_command_runs_in_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("cron.log");
        fs::write(dir.path().join("marker.txt"), "here").unwrap();

        let result = run_logged("cat marker.txt", dir.path(), &log).unwrap();

        assert!(result.success());
        assert_eq!(fs::read_to_string(&log).unwrap(), "here");
    }

    #[test]
    fn test_empty_output_appends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("cron.log");

        let result = run_logged("true", dir.path(), &log).unwrap();

        assert!(result.success());
        assert_eq!(result.bytes_appended, 0);
        assert!(log.exists());
    }
}
