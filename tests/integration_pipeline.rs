// tests/integration_pipeline.rs

//! End-to-end pipeline runs against a real git working copy pushing to a
//! bare repository.

use cronpush::pipeline::{Stage, StageOutcome, run_pipeline};
use cronpush_test_utils::builders::ConfigBuilder;
use cronpush_test_utils::git_project::{BareRemote, GitProject};
use cronpush_test_utils::init_tracing;

#[test]
fn test_successful_run_logs_commits_and_pushes() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);
    let cfg = ConfigBuilder::new("printf 'OK\\n'").build();

    let report = run_pipeline(&cfg, &project.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.command_exit, Some(0));
    assert_eq!(report.bytes_appended, 3);
    for stage in Stage::ALL {
        assert_eq!(report.outcome_of(stage), Some(&StageOutcome::Success), "{stage}");
    }

    assert_eq!(project.read_file("cron.log"), "OK\n");
    assert!(project.head_message().starts_with("Cron: Updated log on "));
    assert_eq!(
        remote.head_message("main").as_deref(),
        Some(project.head_message().as_str())
    );
}

#[test]
fn test_failing_command_still_commits_and_pushes_by_default() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);
    let cfg = ConfigBuilder::new("printf 'ERROR: failed\\n' >&2; exit 1").build();

    let report = run_pipeline(&cfg, &project.path()).unwrap();

    // The command's failure is recorded, but the run itself succeeds.
    assert!(report.is_success());
    assert_eq!(report.command_exit, Some(1));
    assert!(report.outcome_of(Stage::RunCommand).unwrap().is_failed());
    assert_eq!(report.outcome_of(Stage::Push), Some(&StageOutcome::Success));

    // The stderr line was still captured into the log and pushed.
    assert_eq!(project.read_file("cron.log"), "ERROR: failed\n");
    assert!(remote.has_branch("main"));
}

#[test]
fn test_failing_command_halts_when_continue_on_failure_is_off() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);
    let cfg = ConfigBuilder::new("printf 'partial\\n'; exit 3")
        .continue_on_failure(false)
        .build();

    let report = run_pipeline(&cfg, &project.path()).unwrap();

    assert_eq!(report.halted(), Some(Stage::RunCommand));
    assert_eq!(report.command_exit, Some(3));
    assert!(matches!(
        report.outcome_of(Stage::Commit),
        Some(StageOutcome::Skipped { .. })
    ));

    // The partial output is in the log, but nothing was committed or pushed.
    assert_eq!(project.read_file("cron.log"), "partial\n");
    assert_eq!(project.commit_count(), 0);
    assert!(!remote.has_branch("main"));
}

#[test]
fn test_unchanged_log_halts_at_commit_and_skips_push() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);
    let cfg = ConfigBuilder::new("true").build();

    // First run creates and commits the (empty) log file.
    let first = run_pipeline(&cfg, &project.path()).unwrap();
    assert!(first.is_success());
    assert_eq!(project.commit_count(), 1);

    // Second run appends nothing, so there is nothing to commit.
    let second = run_pipeline(&cfg, &project.path()).unwrap();

    assert_eq!(second.halted(), Some(Stage::Commit));
    match second.outcome_of(Stage::Commit) {
        Some(StageOutcome::Failed { message, .. }) => {
            assert!(message.contains("nothing to commit"));
        }
        other => panic!("Expected failed commit outcome, got {other:?}"),
    }
    assert!(matches!(
        second.outcome_of(Stage::Push),
        Some(StageOutcome::Skipped { .. })
    ));
    assert_eq!(project.commit_count(), 1);
}

#[test]
fn test_log_is_append_only_across_runs() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);

    let first_cfg = ConfigBuilder::new("printf 'first\\n'").build();
    let first = run_pipeline(&first_cfg, &project.path()).unwrap();
    assert!(first.is_success());
    let after_first = project.read_file("cron.log");

    let second_cfg = ConfigBuilder::new("printf 'second\\n'").build();
    let second = run_pipeline(&second_cfg, &project.path()).unwrap();
    assert!(second.is_success());
    let after_second = project.read_file("cron.log");

    // Never shrinks, earlier content is preserved, and the new output is a
    // byte-for-byte suffix of what was appended.
    assert!(after_second.len() >= after_first.len());
    assert!(after_second.starts_with(&after_first));
    assert!(after_second.ends_with("second\n"));
    assert_eq!(after_second, "first\nsecond\n");
}

#[test]
fn test_custom_message_template_and_branch() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);
    project.git(&["symbolic-ref", "HEAD", "refs/heads/logs"]);

    let cfg = ConfigBuilder::new("printf 'OK\\n'")
        .branch("logs")
        .message_template("nightly log sync ({timestamp})")
        .timestamp_format("%Y-%m-%d")
        .build();

    let report = run_pipeline(&cfg, &project.path()).unwrap();

    assert!(report.is_success());
    let message = project.head_message();
    assert!(message.starts_with("nightly log sync ("));
    assert!(message.ends_with(')'));
    assert_eq!(remote.head_message("logs").as_deref(), Some(message.as_str()));
}

#[test]
fn test_show_remotes_disabled_skips_the_diagnostic_stage() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);
    let cfg = ConfigBuilder::new("printf 'OK\\n'").show_remotes(false).build();

    let report = run_pipeline(&cfg, &project.path()).unwrap();

    assert!(report.is_success());
    assert!(matches!(
        report.outcome_of(Stage::RemoteInfo),
        Some(StageOutcome::Skipped { .. })
    ));
}

#[test]
fn test_custom_log_path_in_subdirectory() {
    init_tracing();

    let remote = BareRemote::new();
    let project = GitProject::with_remote(&remote);
    let cfg = ConfigBuilder::new("printf 'OK\\n'")
        .log_file("logs/cron.log")
        .build();

    let report = run_pipeline(&cfg, &project.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(project.read_file("logs/cron.log"), "OK\n");

    // Only the log file is part of the commit.
    let listed = project.git(&["show", "--name-only", "--format=", "HEAD"]);
    assert_eq!(listed.trim(), "logs/cron.log");
}

#[test]
fn test_push_to_missing_remote_halts_at_push() {
    init_tracing();

    // Working copy with no remote configured at all: remote-info succeeds
    // with empty output, commit succeeds, push fails.
    let project = GitProject::new();
    let cfg = ConfigBuilder::new("printf 'OK\\n'").build();

    let report = run_pipeline(&cfg, &project.path()).unwrap();

    assert_eq!(report.halted(), Some(Stage::Push));
    assert_eq!(report.outcome_of(Stage::Commit), Some(&StageOutcome::Success));

    // The commit exists locally even though the push failed.
    assert_eq!(project.commit_count(), 1);
}
