// src/pipeline/report.rs

//! Structured record of one invocation.
//!
//! Instead of collapsing everything into a single process exit status, each
//! stage's result is captured as a discriminated outcome, so callers can
//! tell exactly which stage halted a run and why.

use std::fmt;

/// One step of the fixed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RemoteInfo,
    RunCommand,
    StageLog,
    Commit,
    Push,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::RemoteInfo,
        Stage::RunCommand,
        Stage::StageLog,
        Stage::Commit,
        Stage::Push,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::RemoteInfo => "remote-info",
            Stage::RunCommand => "run-command",
            Stage::StageLog => "stage-log",
            Stage::Commit => "commit",
            Stage::Push => "push",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    Failed {
        message: String,
        exit_code: Option<i32>,
    },
    Skipped {
        reason: String,
    },
}

impl StageOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed { .. })
    }
}

/// A stage paired with its outcome.
#[derive(Debug, Clone)]
pub struct StageResult {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// The full record of one invocation.
///
/// `halted` is the stage at which the sequence stopped, if any. A failed
/// run-command outcome with `continue_on_failure` enabled is recorded as
/// failed but does not set `halted`.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    stages: Vec<StageResult>,
    halted: Option<Stage>,

    /// Bytes appended to the log file by the run-command stage.
    pub bytes_appended: u64,

    /// Exit code of the external command, when it ran to completion.
    pub command_exit: Option<i32>,
}

impl RunReport {
    pub fn record(&mut self, stage: Stage, outcome: StageOutcome) {
        self.stages.push(StageResult { stage, outcome });
    }

    /// Mark the sequence as halted at `stage` and record the remaining
    /// stages as skipped.
    pub fn halt(&mut self, stage: Stage) {
        self.halted = Some(stage);
        let reason = format!("stage '{stage}' failed");
        for later in Stage::ALL.iter().skip_while(|s| **s != stage).skip(1) {
            self.record(*later, StageOutcome::Skipped { reason: reason.clone() });
        }
    }

    /// The stage the sequence halted at, if any.
    pub fn halted(&self) -> Option<Stage> {
        self.halted
    }

    pub fn is_success(&self) -> bool {
        self.halted.is_none()
    }

    pub fn stages(&self) -> &[StageResult] {
        &self.stages
    }

    /// Outcome recorded for a given stage, if the stage was reached.
    pub fn outcome_of(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.outcome)
    }

    /// Human-readable one-line-per-stage summary.
    pub fn summary_lines(&self) -> Vec<String> {
        self.stages
            .iter()
            .map(|r| match &r.outcome {
                StageOutcome::Success => format!("{}: ok", r.stage),
                StageOutcome::Failed { message, exit_code } => match exit_code {
                    Some(code) => format!("{}: failed (exit {code}): {message}", r.stage),
                    None => format!("{}: failed: {message}", r.stage),
                },
                StageOutcome::Skipped { reason } => {
                    format!("{}: skipped ({reason})", r.stage)
                }
            })
            .collect()
    }
}
