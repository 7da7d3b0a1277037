// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod git;
pub mod logging;
pub mod pipeline;

use std::path::{Path, PathBuf};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::pipeline::RunReport;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + validation
/// - project root resolution
/// - the run pipeline (lock, remote info, command, stage, commit, push)
pub fn run(args: CliArgs) -> Result<RunReport> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let project_root = resolve_project_root(&config_path, &cfg);

    if args.dry_run {
        print_dry_run(&cfg, &project_root);
        return Ok(RunReport::default());
    }

    pipeline::run_pipeline(&cfg, &project_root)
}

/// Resolve the configured project root to a concrete path.
///
/// - Absolute roots are used as-is.
/// - Relative roots resolve against the config file's directory, so a config
///   checked into the project itself can just say `root = "."`.
fn resolve_project_root(config_path: &Path, cfg: &ConfigFile) -> PathBuf {
    let root = &cfg.project.root;
    if root.is_absolute() {
        return root.clone();
    }
    config_dir(config_path).join(root)
}

/// Directory the config file lives in.
///
/// A bare filename like "Cronpush.toml" has an empty parent; fall back to
/// the current working directory in that case.
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Simple dry-run output: print the resolved pipeline, execute nothing.
fn print_dry_run(cfg: &ConfigFile, project_root: &Path) {
    println!("cronpush dry-run");
    println!("  project.root = {}", project_root.display());
    println!("  project.log_file = {}", cfg.project.log_file.display());
    println!("  project.lock_file = {}", cfg.project.lock_file.display());
    println!();
    println!("  run.command = {}", cfg.run.command);
    println!("  run.continue_on_failure = {}", cfg.run.continue_on_failure);
    println!();
    println!("  git.remote = {}", cfg.git.remote);
    println!("  git.branch = {}", cfg.git.branch);
    println!("  git.message_template = {}", cfg.git.message_template);
    println!("  git.timestamp_format = {}", cfg.git.timestamp_format);
    println!("  git.show_remotes = {}", cfg.git.show_remotes);
}
