use std::io;
use std::process::Command;

use crate::domain::AppError;
use crate::ports::{DeploymentPort, DeploymentRequest};

/// Submits deployments through the Azure CLI.
#[derive(Debug, Clone)]
pub struct AzCommandAdapter {
    bin: String,
}

impl AzCommandAdapter {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn deployment_args(request: &DeploymentRequest<'_>) -> Vec<String> {
        vec![
            "deployment".to_string(),
            "group".to_string(),
            "create".to_string(),
            "--name".to_string(),
            request.name.to_string(),
            "--resource-group".to_string(),
            request.resource_group.to_string(),
            "--template-file".to_string(),
            request.template_file.display().to_string(),
            "--parameters".to_string(),
            format!("@{}", request.parameters_file.display()),
        ]
    }

    fn missing_tool(&self, err: io::Error) -> AppError {
        AppError::MissingTool { tool: self.bin.clone(), details: err.to_string() }
    }
}

impl DeploymentPort for AzCommandAdapter {
    fn ensure_available(&self) -> Result<(), AppError> {
        let output = Command::new(&self.bin)
            .arg("version")
            .output()
            .map_err(|e| self.missing_tool(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::MissingTool {
                tool: self.bin.clone(),
                details: format!("'{} version' failed: {}", self.bin, stderr.trim()),
            });
        }

        Ok(())
    }

    fn create_deployment(&self, request: &DeploymentRequest<'_>) -> Result<(), AppError> {
        let output = Command::new(&self.bin)
            .args(Self::deployment_args(request))
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => self.missing_tool(e),
                _ => AppError::SubmissionFailure {
                    deployment: request.name.to_string(),
                    details: e.to_string(),
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let details = if stderr.is_empty() {
                format!("{} exited with {}", self.bin, output.status)
            } else {
                stderr
            };
            return Err(AppError::SubmissionFailure {
                deployment: request.name.to_string(),
                details,
            });
        }

        Ok(())
    }

    fn describe(&self, request: &DeploymentRequest<'_>) -> String {
        std::iter::once(self.bin.clone())
            .chain(Self::deployment_args(request))
            .map(|arg| shell_quote(&arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote `arg` for a POSIX shell when it contains anything beyond plain word characters.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg.chars().all(|c| c.is_ascii_alphanumeric() || "-_./@:=,+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
