use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{DeploymentPort, DeploymentRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedDeployment {
    pub name: String,
    pub resource_group: String,
    pub template_file: PathBuf,
    pub parameters_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
enum Mode {
    #[default]
    Succeed,
    /// Tooling probe fails.
    Unavailable,
    /// Submissions for deployments of this application fail.
    FailFor(String),
    /// Tooling probe passes but the binary is gone at submission time.
    Vanishing,
}

/// In-memory deployment port recording every submission.
#[derive(Debug, Default)]
pub struct FakeDeployer {
    mode: Mode,
    submitted: Mutex<Vec<SubmittedDeployment>>,
}

#[allow(dead_code)]
impl FakeDeployer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self { mode: Mode::Unavailable, ..Self::default() }
    }

    pub fn failing_for(app_name: &str) -> Self {
        Self { mode: Mode::FailFor(app_name.to_string()), ..Self::default() }
    }

    pub fn vanishing() -> Self {
        Self { mode: Mode::Vanishing, ..Self::default() }
    }

    pub fn submitted(&self) -> Vec<SubmittedDeployment> {
        self.submitted.lock().unwrap().clone()
    }

    fn missing_tool() -> AppError {
        AppError::MissingTool { tool: "az".into(), details: "not installed".into() }
    }
}

impl DeploymentPort for FakeDeployer {
    fn ensure_available(&self) -> Result<(), AppError> {
        match self.mode {
            Mode::Unavailable => Err(Self::missing_tool()),
            _ => Ok(()),
        }
    }

    fn create_deployment(&self, request: &DeploymentRequest<'_>) -> Result<(), AppError> {
        match &self.mode {
            Mode::Unavailable | Mode::Vanishing => return Err(Self::missing_tool()),
            Mode::FailFor(app) if request.name.starts_with(&format!("{}-", app)) => {
                return Err(AppError::SubmissionFailure {
                    deployment: request.name.to_string(),
                    details: "InvalidTemplateDeployment".into(),
                });
            }
            _ => {}
        }

        self.submitted.lock().unwrap().push(SubmittedDeployment {
            name: request.name.to_string(),
            resource_group: request.resource_group.to_string(),
            template_file: request.template_file.to_path_buf(),
            parameters_file: request.parameters_file.to_path_buf(),
        });
        Ok(())
    }

    fn describe(&self, request: &DeploymentRequest<'_>) -> String {
        format!(
            "az deployment group create --name {} --resource-group {}",
            request.name, request.resource_group
        )
    }
}
