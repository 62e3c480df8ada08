use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mod smoke;

/// A test context that provides an isolated temporary directory and config
/// home. Tests can run in parallel because each has its own temp directory.
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory used as PHISHGUARD_HOME for this context
    pub fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    /// Run phishguard in this temp directory with no credential set
    pub fn run(&self, args: &[&str]) -> CommandResult {
        self.run_inner(args, None)
    }

    /// Run phishguard with the given credential in the environment
    pub fn run_with_key(&self, args: &[&str], key: &str) -> CommandResult {
        self.run_inner(args, Some(key))
    }

    fn run_inner(&self, args: &[&str], key: Option<&str>) -> CommandResult {
        let mut cmd = Command::cargo_bin("phishguard").expect("Failed to find phishguard binary");
        cmd.args(args);
        cmd.current_dir(self.path());
        cmd.env("PHISHGUARD_HOME", self.config_home());

        match key {
            Some(key) => cmd.env("GEMINI_API_KEY", key),
            None => cmd.env_remove("GEMINI_API_KEY"),
        };

        let output = cmd.output().expect("Failed to execute phishguard command");

        CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

pub fn assert_success(result: &CommandResult) {
    assert!(
        result.success(),
        "Expected command to succeed but it failed.\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
        result.stdout,
        result.stderr
    );
}

pub fn assert_failure(result: &CommandResult) {
    assert!(
        !result.success(),
        "Expected command to fail but it succeeded.\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
        result.stdout,
        result.stderr
    );
}
