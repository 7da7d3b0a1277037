#![allow(dead_code)]

use std::path::PathBuf;

use cronpush::config::{ConfigFile, GitSection, ProjectSection, RunSection, validate_config};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigBuilder {
    config: ConfigFile,
}

impl ConfigBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            config: ConfigFile {
                project: ProjectSection::default(),
                run: RunSection {
                    command: command.to_string(),
                    continue_on_failure: true,
                },
                git: GitSection::default(),
            },
        }
    }

    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.project.root = path.into();
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.project.log_file = path.into();
        self
    }

    pub fn lock_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.project.lock_file = path.into();
        self
    }

    pub fn continue_on_failure(mut self, val: bool) -> Self {
        self.config.run.continue_on_failure = val;
        self
    }

    pub fn remote(mut self, name: &str) -> Self {
        self.config.git.remote = name.to_string();
        self
    }

    pub fn branch(mut self, name: &str) -> Self {
        self.config.git.branch = name.to_string();
        self
    }

    pub fn message_template(mut self, template: &str) -> Self {
        self.config.git.message_template = template.to_string();
        self
    }

    pub fn timestamp_format(mut self, format: &str) -> Self {
        self.config.git.timestamp_format = format.to_string();
        self
    }

    pub fn show_remotes(mut self, val: bool) -> Self {
        self.config.git.show_remotes = val;
        self
    }

    pub fn build(self) -> ConfigFile {
        validate_config(&self.config).expect("Failed to build valid config from builder");
        self.config
    }

    /// Render the config as a TOML document, for tests that exercise the
    /// loader end to end.
    pub fn toml_string(&self) -> String {
        format!(
            r#"[project]
root = {root:?}
log_file = {log_file:?}
lock_file = {lock_file:?}

[run]
command = {command:?}
continue_on_failure = {continue_on_failure}

[git]
remote = {remote:?}
branch = {branch:?}
message_template = {message_template:?}
timestamp_format = {timestamp_format:?}
show_remotes = {show_remotes}
"#,
            root = self.config.project.root.to_string_lossy(),
            log_file = self.config.project.log_file.to_string_lossy(),
            lock_file = self.config.project.lock_file.to_string_lossy(),
            command = self.config.run.command,
            continue_on_failure = self.config.run.continue_on_failure,
            remote = self.config.git.remote,
            branch = self.config.git.branch,
            message_template = self.config.git.message_template,
            timestamp_format = self.config.git.timestamp_format,
            show_remotes = self.config.git.show_remotes,
        )
    }
}
