//! Tool settings loaded from `aca-deploy.toml`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::deployment::is_config_file_name;

/// Default settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "aca-deploy.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub az: AzSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        self.az.validate()?;
        self.output.validate()?;
        self.discovery.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AzSettings {
    /// Azure CLI executable.
    #[serde(default = "default_az_bin")]
    pub bin: String,
}

impl Default for AzSettings {
    fn default() -> Self {
        Self { bin: default_az_bin() }
    }
}

impl AzSettings {
    fn validate(&self) -> Result<(), String> {
        if self.bin.trim().is_empty() {
            return Err("az.bin must not be empty".to_string());
        }
        Ok(())
    }
}

/// File names of the rendered documents, written beside the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    #[serde(default = "default_template_file")]
    pub template_file: String,
    #[serde(default = "default_parameters_file")]
    pub parameters_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { template_file: default_template_file(), parameters_file: default_parameters_file() }
    }
}

impl OutputSettings {
    fn validate(&self) -> Result<(), String> {
        for (key, value) in
            [("output.template_file", &self.template_file), ("output.parameters_file", &self.parameters_file)]
        {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", key));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(format!("{} must be a file name, not a path", key));
            }
            if is_config_file_name(value) {
                return Err(format!("{} '{}' would overwrite a configuration file", key, value));
            }
        }
        if self.template_file == self.parameters_file {
            return Err("output.template_file and output.parameters_file must differ".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverySettings {
    /// How many directory levels below the search root are scanned in batch mode.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self { max_depth: default_max_depth() }
    }
}

impl DiscoverySettings {
    fn validate(&self) -> Result<(), String> {
        if !(1..=4).contains(&self.max_depth) {
            return Err("discovery.max_depth must be between 1 and 4".to_string());
        }
        Ok(())
    }
}

fn default_az_bin() -> String {
    "az".to_string()
}

fn default_template_file() -> String {
    "azuredeploy.json".to_string()
}

fn default_parameters_file() -> String {
    "azuredeploy.parameters.json".to_string()
}

fn default_max_depth() -> usize {
    2
}

/// Load settings from `explicit` if given, otherwise from `SETTINGS_FILE` in
/// `cwd` when present, otherwise defaults.
pub fn load_settings(explicit: Option<&Path>, cwd: &Path) -> Result<Settings, AppError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(SETTINGS_FILE);
            if !candidate.is_file() {
                return Ok(Settings::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path).map_err(|e| AppError::SettingsParse {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    parse_settings(&path, &content)
}

pub fn parse_settings(path: &Path, content: &str) -> Result<Settings, AppError> {
    let error = |details: String| AppError::SettingsParse { path: path.display().to_string(), details };

    let settings: Settings = toml::from_str(content).map_err(|e| error(e.to_string()))?;
    settings.validate().map_err(error)?;
    Ok(settings)
}
