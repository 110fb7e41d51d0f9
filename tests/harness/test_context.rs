//! Shared testing harness for `aca-deploy` integration tests.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::app_config::app_config;
use super::fake_az::FakeAz;

/// Testing harness providing an isolated environment for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    az: FakeAz,
}

impl TestContext {
    /// Create a new isolated environment with a fake `az` on hand.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir, az: FakeAz::new() }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub(crate) fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory used as working directory for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn az(&self) -> &FakeAz {
        &self.az
    }

    /// Build a command for invoking the compiled `aca-deploy` binary within the work directory.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("aca-deploy").expect("Failed to locate aca-deploy binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.home())
            .env("ACA_DEPLOY_AZ", self.az.bin());
        cmd
    }

    /// Write an application configuration under `folder` and return the folder path.
    pub(crate) fn write_app(&self, folder: &str, resource_group: &str, app_name: &str) -> PathBuf {
        self.write_config(folder, &format!("{}_variable.json", app_name), &app_config(resource_group, app_name))
    }

    /// Write an arbitrary configuration document as `folder/file_name`.
    pub(crate) fn write_config(&self, folder: &str, file_name: &str, config: &Value) -> PathBuf {
        let dir = self.work_dir.join(folder);
        fs::create_dir_all(&dir).expect("Failed to create application folder");
        let content = serde_json::to_string_pretty(config).expect("Failed to serialize config");
        fs::write(dir.join(file_name), content).expect("Failed to write config");
        dir
    }

    /// Parse a JSON file relative to the work directory.
    pub(crate) fn read_json(&self, relative: &str) -> Value {
        let content = fs::read_to_string(self.work_dir.join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e));
        serde_json::from_str(&content).expect("Rendered file should be valid JSON")
    }
}
