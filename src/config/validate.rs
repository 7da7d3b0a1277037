// src/config/validate.rs

use crate::config::model::{ConfigFile, TIMESTAMP_PLACEHOLDER};
use crate::errors::{CronpushError, Result};

/// Validate a loaded configuration.
///
/// All violations are reported as [`CronpushError::ConfigError`] before
/// anything executes; a config that passes here can only fail later for
/// environmental reasons (missing root, git failures).
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_command(cfg)?;
    validate_git_names(cfg)?;
    validate_paths(cfg)?;
    validate_message_template(cfg)?;
    validate_timestamp_format(cfg)?;
    Ok(())
}

fn validate_command(cfg: &ConfigFile) -> Result<()> {
    if cfg.run.command.trim().is_empty() {
        return Err(CronpushError::ConfigError(
            "[run].command must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_git_names(cfg: &ConfigFile) -> Result<()> {
    for (field, value) in [("remote", &cfg.git.remote), ("branch", &cfg.git.branch)] {
        if value.is_empty() {
            return Err(CronpushError::ConfigError(format!(
                "[git].{field} must not be empty"
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(CronpushError::ConfigError(format!(
                "[git].{field} must not contain whitespace (got {value:?})"
            )));
        }
    }
    Ok(())
}

fn validate_paths(cfg: &ConfigFile) -> Result<()> {
    if cfg.project.log_file.as_os_str().is_empty() {
        return Err(CronpushError::ConfigError(
            "[project].log_file must not be empty".to_string(),
        ));
    }
    if cfg.project.lock_file.as_os_str().is_empty() {
        return Err(CronpushError::ConfigError(
            "[project].lock_file must not be empty".to_string(),
        ));
    }
    if cfg.project.log_file == cfg.project.lock_file {
        return Err(CronpushError::ConfigError(format!(
            "[project].log_file and [project].lock_file must be distinct (both are {:?})",
            cfg.project.log_file
        )));
    }
    Ok(())
}

fn validate_message_template(cfg: &ConfigFile) -> Result<()> {
    if !cfg.git.message_template.contains(TIMESTAMP_PLACEHOLDER) {
        return Err(CronpushError::ConfigError(format!(
            "[git].message_template must contain the {TIMESTAMP_PLACEHOLDER} placeholder \
             (got {:?})",
            cfg.git.message_template
        )));
    }
    Ok(())
}

/// chrono reports an unknown strftime specifier only when the formatted
/// value is displayed; render a probe value here so a bad format is a
/// config error instead of a failure at commit time.
fn validate_timestamp_format(cfg: &ConfigFile) -> Result<()> {
    use std::fmt::Write as _;

    let mut probe = String::new();
    let formatted = chrono::Local::now().format(&cfg.git.timestamp_format);
    if write!(probe, "{formatted}").is_err() {
        return Err(CronpushError::ConfigError(format!(
            "[git].timestamp_format is not a valid strftime format (got {:?})",
            cfg.git.timestamp_format
        )));
    }
    Ok(())
}
