//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test files
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Environment variables that would leak the developer's setup into a test.
const SCRUBBED_ENV: &[&str] = &["NOTESHELF_TOKEN", "GITHUB_TOKEN", "CI", "RUST_LOG"];

/// Fluent wrapper around `assert_cmd::Command` for the `noteshelf` binary.
///
/// Token and CI variables are removed from the child environment unless
/// set explicitly with [`ShelfCommand::env`].
pub struct ShelfCommand {
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl ShelfCommand {
    /// Creates a new command for the `noteshelf` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Sets the `--config` option.
    pub fn config(self, path: &Path) -> Self {
        self.args(["--config".to_string(), path.to_string_lossy().to_string()])
    }

    /// Sets the `--artifact` option.
    pub fn artifact(self, path: &Path) -> Self {
        self.args(["--artifact".to_string(), path.to_string_lossy().to_string()])
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("noteshelf").expect("Failed to find noteshelf binary");
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `show` command with a note name.
    pub fn show(self, name: &str) -> Self {
        self.args(["show", name])
    }

    /// Configures for the `site` command writing to `output`.
    pub fn site(self, output: &Path) -> Self {
        self.args(["site".to_string(), "--output".to_string(), output.to_string_lossy().to_string()])
    }

    /// Configures for the `fetch` command.
    pub fn fetch(self) -> Self {
        self.args(["fetch"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for ShelfCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        ShelfCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_builds_args() {
        let cmd = ShelfCommand::new()
            .config(Path::new("/tmp/c.toml"))
            .ls()
            .format_json();
        assert_eq!(
            cmd.get_args(),
            ["--config", "/tmp/c.toml", "ls", "--format", "json"]
        );
    }
}
