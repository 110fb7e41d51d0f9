use std::path::Path;

use crate::domain::AppError;

/// A rendered template pair ready for submission.
#[derive(Debug, Clone, Copy)]
pub struct DeploymentRequest<'a> {
    pub name: &'a str,
    pub resource_group: &'a str,
    pub template_file: &'a Path,
    pub parameters_file: &'a Path,
}

/// Port for submitting resource-group deployments to the cloud platform.
pub trait DeploymentPort {
    /// Verify the platform tooling can be executed.
    fn ensure_available(&self) -> Result<(), AppError>;

    /// Submit a deployment and block until the platform reports a result.
    fn create_deployment(&self, request: &DeploymentRequest<'_>) -> Result<(), AppError>;

    /// Human-readable command line for a request.
    fn describe(&self, request: &DeploymentRequest<'_>) -> String;
}
