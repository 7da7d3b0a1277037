// src/pipeline/runner.rs

//! Sequencing of the five pipeline stages.

use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::config::model::{ConfigFile, TIMESTAMP_PLACEHOLDER};
use crate::errors::{CronpushError, Result};
use crate::git::{GitError, GitRunner};
use crate::pipeline::exec;
use crate::pipeline::lock::RunLock;
use crate::pipeline::report::{RunReport, Stage, StageOutcome};

/// Run the full sequence against a resolved project root.
///
/// Environment problems (missing root, held lock) surface as `Err`; once
/// the sequence starts, stage failures are captured in the returned
/// [`RunReport`] instead. Any stage failure halts the sequence at that
/// stage; there is no retry. The exception is a non-zero exit from the
/// external command when `continue_on_failure` is enabled, which is
/// recorded but does not halt.
pub fn run_pipeline(cfg: &ConfigFile, project_root: &Path) -> Result<RunReport> {
    if !project_root.is_dir() {
        return Err(CronpushError::ProjectRootMissing(project_root.to_path_buf()));
    }

    let _lock = RunLock::acquire(cfg.lock_path(project_root))?;

    let git = GitRunner::new(project_root.to_path_buf());
    let mut report = RunReport::default();

    // Stage 1: remote-info. Informational only; printed to stdout verbatim.
    if cfg.git.show_remotes {
        info!(stage = %Stage::RemoteInfo, "querying configured remotes");
        match git.remotes() {
            Ok(out) => {
                print!("{out}");
                report.record(Stage::RemoteInfo, StageOutcome::Success);
            }
            Err(err) => {
                report.record(Stage::RemoteInfo, git_failure(&err));
                report.halt(Stage::RemoteInfo);
                return Ok(report);
            }
        }
    } else {
        report.record(
            Stage::RemoteInfo,
            StageOutcome::Skipped {
                reason: "show_remotes = false".to_string(),
            },
        );
    }

    // Stage 2: run-command.
    let log_path = cfg.log_path(project_root);
    match exec::run_logged(&cfg.run.command, project_root, &log_path) {
        Ok(result) => {
            report.bytes_appended = result.bytes_appended;
            report.command_exit = result.exit_code;

            if result.success() {
                report.record(Stage::RunCommand, StageOutcome::Success);
            } else {
                let message = match result.exit_code {
                    Some(code) => format!("command exited with status {code}"),
                    None => "command terminated by signal".to_string(),
                };
                report.record(
                    Stage::RunCommand,
                    StageOutcome::Failed {
                        message,
                        exit_code: result.exit_code,
                    },
                );

                if cfg.run.continue_on_failure {
                    warn!(
                        exit_code = ?result.exit_code,
                        "external command failed; continuing (continue_on_failure = true)"
                    );
                } else {
                    report.halt(Stage::RunCommand);
                    return Ok(report);
                }
            }
        }
        Err(err) => {
            report.record(
                Stage::RunCommand,
                StageOutcome::Failed {
                    message: format!("{err:#}"),
                    exit_code: None,
                },
            );
            report.halt(Stage::RunCommand);
            return Ok(report);
        }
    }

    // Stage 3: stage-log.
    info!(stage = %Stage::StageLog, log = %cfg.project.log_file.display(), "staging log file");
    if let Err(err) = git.stage(&cfg.project.log_file) {
        report.record(Stage::StageLog, git_failure(&err));
        report.halt(Stage::StageLog);
        return Ok(report);
    }
    report.record(Stage::StageLog, StageOutcome::Success);

    // Stage 4: commit.
    let message = render_message(
        &cfg.git.message_template,
        &cfg.git.timestamp_format,
        Local::now(),
    );
    info!(stage = %Stage::Commit, message = %message, "committing log file");
    match git.commit(&message) {
        Ok(_) => report.record(Stage::Commit, StageOutcome::Success),
        Err(err) => {
            if matches!(err, GitError::NothingToCommit) {
                // Expected whenever the appended output is empty or identical
                // to the previous content; the run still ends unsuccessfully.
                info!("log content unchanged since last commit");
            }
            report.record(Stage::Commit, git_failure(&err));
            report.halt(Stage::Commit);
            return Ok(report);
        }
    }

    // Stage 5: push.
    info!(
        stage = %Stage::Push,
        remote = %cfg.git.remote,
        branch = %cfg.git.branch,
        "pushing commit"
    );
    if let Err(err) = git.push(&cfg.git.remote, &cfg.git.branch) {
        report.record(Stage::Push, git_failure(&err));
        report.halt(Stage::Push);
        return Ok(report);
    }
    report.record(Stage::Push, StageOutcome::Success);

    info!(bytes_appended = report.bytes_appended, "run complete");
    Ok(report)
}

/// Render the commit message by substituting the timestamp placeholder.
pub fn render_message(template: &str, timestamp_format: &str, now: DateTime<Local>) -> String {
    let timestamp = now.format(timestamp_format).to_string();
    template.replace(TIMESTAMP_PLACEHOLDER, &timestamp)
}

fn git_failure(err: &GitError) -> StageOutcome {
    let exit_code = match err {
        GitError::CommandFailed { exit_code, .. } => Some(*exit_code),
        _ => None,
    };
    StageOutcome::Failed {
        message: err.to_string(),
        exit_code,
    }
}
