//! Render a configuration document into a template and parameters pair.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{AppError, ConfigDocument, OutputSettings, RenderedDeployment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub app_name: String,
    pub template_path: PathBuf,
    pub parameters_path: PathBuf,
    pub secrets: usize,
    pub variables: usize,
    pub volumes: usize,
}

/// Render the configuration at `config_path`, overwriting both output files.
pub fn execute(config_path: &Path, output: &OutputSettings) -> Result<RenderOutcome, AppError> {
    let document = ConfigDocument::load(config_path)?;
    let config = document.resolve()?;
    let rendered = RenderedDeployment::render(&config);

    let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let template_path = dir.join(&output.template_file);
    let parameters_path = dir.join(&output.parameters_file);
    for path in [&template_path, &parameters_path] {
        if path.file_name() == config_path.file_name() {
            return Err(AppError::InvalidConfig {
                path: config_path.display().to_string(),
                reason: format!("output {} would overwrite the configuration", path.display()),
            });
        }
    }

    write_document(&template_path, &rendered.template)?;
    write_document(&parameters_path, &rendered.parameters)?;

    Ok(RenderOutcome {
        app_name: config.app.name,
        template_path,
        parameters_path,
        secrets: config.secrets.len(),
        variables: config.variables.len(),
        volumes: config.app.volumes.len(),
    })
}

fn write_document(path: &Path, document: &Value) -> Result<(), AppError> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}
