//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together settings,
//! context creation and command execution.

use std::path::{Path, PathBuf};

use crate::adapters::az_command::AzCommandAdapter;
use crate::adapters::system_clock::SystemClock;
use crate::app::{
    AppContext,
    commands::{deploy, render},
};
use crate::domain::settings::load_settings;

pub use crate::app::commands::deploy::{DeployOptions, DeployResult};
pub use crate::app::commands::render::RenderOutcome;
pub use crate::domain::{
    AppError, ApplicationFailure, BatchSummary, DeployTarget, DeploymentOutcome, Settings,
};

/// Tool-level options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct ToolOptions {
    /// Explicit settings file; `aca-deploy.toml` in the working directory otherwise.
    pub settings: Option<PathBuf>,
    /// Azure CLI executable overriding the settings file.
    pub az_bin: Option<String>,
}

/// Resolve settings for the current directory, applying overrides.
pub fn settings(options: &ToolOptions) -> Result<Settings, AppError> {
    settings_at(options, &std::env::current_dir()?)
}

pub fn settings_at(options: &ToolOptions, cwd: &Path) -> Result<Settings, AppError> {
    let mut settings = load_settings(options.settings.as_deref(), cwd)?;
    if let Some(bin) = options.az_bin.as_deref().filter(|bin| !bin.trim().is_empty()) {
        settings.az.bin = bin.to_string();
    }
    Ok(settings)
}

fn create_context(settings: Settings) -> AppContext<AzCommandAdapter, SystemClock> {
    let deployer = AzCommandAdapter::new(settings.az.bin.clone());
    AppContext::new(deployer, SystemClock, settings)
}

// =============================================================================
// Render Command API
// =============================================================================

/// Render the template and parameters documents for one configuration file.
pub fn render(config_path: &Path, options: &ToolOptions) -> Result<RenderOutcome, AppError> {
    let settings = settings(options)?;
    render::execute(config_path, &settings.output)
}

// =============================================================================
// Deploy Command API
// =============================================================================

/// Deploy one application folder, or every discovered one for `all`.
pub fn deploy(
    target: &str,
    resource_group: &str,
    root: Option<PathBuf>,
    dry_run: bool,
    options: &ToolOptions,
) -> Result<DeployResult, AppError> {
    let settings = settings(options)?;
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let ctx = create_context(settings);
    let options = DeployOptions {
        target: DeployTarget::parse(target),
        resource_group: resource_group.to_string(),
        root,
        dry_run,
    };
    deploy::execute(&ctx, &options)
}
