use std::io;

use thiserror::Error;

/// Library-wide error type for aca-deploy operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// JSON serialization failure while writing rendered documents.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Invalid command-line arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A required external tool could not be executed.
    #[error("Required tool '{tool}' is not available: {details}")]
    MissingTool { tool: String, details: String },

    /// No configuration file found at the given location.
    #[error("No configuration file (*_variable.json or variable.json) found in {0}")]
    ConfigNotFound(String),

    /// More than one configuration file in a single application folder.
    #[error("Ambiguous application in {folder}: multiple configuration files ({files})")]
    AmbiguousConfig { folder: String, files: String },

    /// Configuration document could not be parsed.
    #[error("Failed to parse configuration {path}: {details}")]
    ConfigParse { path: String, details: String },

    /// A required configuration field is absent or null.
    #[error("Missing required field '{field}' in {path}")]
    ConfigFieldMissing { path: String, field: String },

    /// Configuration is well-formed but violates an invariant.
    #[error("Invalid configuration {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    /// Declared resource group differs from the one supplied by the caller.
    #[error(
        "Resource group mismatch for {config}: configuration declares '{declared}' but '{supplied}' was supplied"
    )]
    ResourceGroupMismatch { config: String, declared: String, supplied: String },

    /// Rendering the template pair failed for an application.
    #[error("Rendering failed for {config}: {details}")]
    RenderFailure { config: String, details: String },

    /// Rendered output file is missing after a render.
    #[error("Expected rendered file not found: {0}")]
    OutputMissing(String),

    /// The deployment API reported a failure.
    #[error("Deployment '{deployment}' failed: {details}")]
    SubmissionFailure { deployment: String, details: String },

    /// Batch discovery found nothing to deploy.
    #[error("No application folders with a configuration file found under {0}")]
    NoApplicationsFound(String),

    /// Tool settings file is malformed or invalid.
    #[error("Invalid settings {path}: {details}")]
    SettingsParse { path: String, details: String },
}

impl AppError {
    /// Errors that abort a whole batch instead of failing a single application.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::MissingTool { .. } | AppError::InvalidArguments(_))
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting it.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Json(_)
            | AppError::InvalidArguments(_)
            | AppError::AmbiguousConfig { .. }
            | AppError::ConfigParse { .. }
            | AppError::ConfigFieldMissing { .. }
            | AppError::InvalidConfig { .. }
            | AppError::ResourceGroupMismatch { .. }
            | AppError::SettingsParse { .. } => io::ErrorKind::InvalidInput,
            AppError::MissingTool { .. }
            | AppError::ConfigNotFound(_)
            | AppError::OutputMissing(_)
            | AppError::NoApplicationsFound(_) => io::ErrorKind::NotFound,
            AppError::RenderFailure { .. } | AppError::SubmissionFailure { .. } => {
                io::ErrorKind::Other
            }
        }
    }
}
