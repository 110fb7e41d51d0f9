//! Deployment outcomes and batch accounting.

use std::fmt;
use std::path::PathBuf;

use crate::domain::AppError;

/// Suffix marking an application configuration file.
pub const CONFIG_FILE_SUFFIX: &str = "_variable.json";
/// Configuration file name used when a folder holds a single unnamed application.
pub const CONFIG_FILE_NAME: &str = "variable.json";

/// Whether `file_name` names an application configuration document.
pub fn is_config_file_name(file_name: &str) -> bool {
    file_name == CONFIG_FILE_NAME
        || (file_name.ends_with(CONFIG_FILE_SUFFIX) && file_name.len() > CONFIG_FILE_SUFFIX.len())
}

/// Literal target selecting batch mode.
pub const ALL_TARGET: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    All,
    Folder(PathBuf),
}

impl DeployTarget {
    pub fn parse(target: &str) -> Self {
        if target == ALL_TARGET {
            DeployTarget::All
        } else {
            DeployTarget::Folder(PathBuf::from(target))
        }
    }
}

/// Last stage an application reached in the deploy flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeploymentStage {
    Discovered,
    Validated,
    Rendered,
    Submitted,
}

impl fmt::Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentStage::Discovered => "discovered",
            DeploymentStage::Validated => "validated",
            DeploymentStage::Rendered => "rendered",
            DeploymentStage::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

/// A successful (or dry-run) deployment of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub folder: PathBuf,
    pub config_path: PathBuf,
    pub deployment_name: String,
    pub resource_group: String,
    pub template_path: PathBuf,
    pub parameters_path: PathBuf,
    /// Command line that was (or in a dry run, would have been) executed.
    pub command: String,
    pub dry_run: bool,
}

/// A failed application, with the stage it had reached before failing.
#[derive(Debug)]
pub struct ApplicationFailure {
    pub folder: PathBuf,
    pub stage: DeploymentStage,
    pub error: AppError,
}

/// Accumulated result of a batch deployment.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    pub outcomes: Vec<DeploymentOutcome>,
    pub failures: Vec<ApplicationFailure>,
}

impl BatchSummary {
    pub fn record_success(mut self, outcome: DeploymentOutcome) -> Self {
        self.succeeded += 1;
        self.total += 1;
        self.outcomes.push(outcome);
        self
    }

    pub fn record_failure(mut self, failure: ApplicationFailure) -> Self {
        self.failed += 1;
        self.total += 1;
        self.failures.push(failure);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_configuration_file_names() {
        assert!(is_config_file_name("variable.json"));
        assert!(is_config_file_name("orders_variable.json"));
        assert!(!is_config_file_name("_variable.json"));
        assert!(!is_config_file_name("variables.json"));
        assert!(!is_config_file_name("azuredeploy.json"));
        assert!(!is_config_file_name("orders_variable.json.bak"));
    }

    #[test]
    fn all_selects_batch_mode() {
        assert_eq!(DeployTarget::parse("all"), DeployTarget::All);
        assert_eq!(DeployTarget::parse("apps/orders"), DeployTarget::Folder("apps/orders".into()));
        assert_eq!(DeployTarget::parse("ALL"), DeployTarget::Folder("ALL".into()));
    }

    #[test]
    fn summary_counts_successes_and_failures_independently() {
        let outcome = DeploymentOutcome {
            folder: "a".into(),
            config_path: "a/variable.json".into(),
            deployment_name: "a-20260101000000".into(),
            resource_group: "rg".into(),
            template_path: "a/azuredeploy.json".into(),
            parameters_path: "a/azuredeploy.parameters.json".into(),
            command: "az deployment group create".into(),
            dry_run: false,
        };
        let failure = ApplicationFailure {
            folder: "b".into(),
            stage: DeploymentStage::Discovered,
            error: AppError::ConfigNotFound("b".into()),
        };

        let summary = BatchSummary::default()
            .record_success(outcome.clone())
            .record_failure(failure)
            .record_success(outcome);

        assert_eq!((summary.succeeded, summary.failed, summary.total), (2, 1, 3));
        assert!(!summary.is_success());
    }
}
