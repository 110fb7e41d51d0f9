//! Validate, render and submit application deployments.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::commands::render::RenderOutcome;
use crate::app::commands::{discover, render};
use crate::domain::naming::deployment_name;
use crate::domain::{
    AppError, ApplicationFailure, BatchSummary, ConfigDocument, DeployTarget, DeploymentOutcome,
    DeploymentStage,
};
use crate::ports::{Clock, DeploymentPort, DeploymentRequest};

#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub target: DeployTarget,
    pub resource_group: String,
    /// Search root for batch discovery.
    pub root: PathBuf,
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum DeployResult {
    Single(DeploymentOutcome),
    Batch(BatchSummary),
}

pub fn execute<D: DeploymentPort, C: Clock>(
    ctx: &AppContext<D, C>,
    options: &DeployOptions,
) -> Result<DeployResult, AppError> {
    if options.resource_group.trim().is_empty() {
        return Err(AppError::InvalidArguments("resource group must not be empty".to_string()));
    }
    if !options.dry_run {
        ctx.deployer().ensure_available()?;
    }

    match &options.target {
        DeployTarget::Folder(folder) => {
            deploy_application(ctx, folder, &options.resource_group, options.dry_run)
                .map(DeployResult::Single)
                .map_err(|failure| failure.error)
        }
        DeployTarget::All => {
            deploy_all(ctx, &options.root, &options.resource_group, options.dry_run)
                .map(DeployResult::Batch)
        }
    }
}

/// Deploy every discovered application in sequence.
///
/// Per-application failures are tallied; fatal errors abort the batch.
pub fn deploy_all<D: DeploymentPort, C: Clock>(
    ctx: &AppContext<D, C>,
    root: &Path,
    resource_group: &str,
    dry_run: bool,
) -> Result<BatchSummary, AppError> {
    let folders = discover::discover_applications(root, ctx.settings().discovery.max_depth)?;

    folders.iter().try_fold(BatchSummary::default(), |summary, folder| {
        match deploy_application(ctx, folder, resource_group, dry_run) {
            Ok(outcome) => Ok(summary.record_success(outcome)),
            Err(failure) if failure.error.is_fatal() => Err(failure.error),
            Err(failure) => Ok(summary.record_failure(failure)),
        }
    })
}

/// Run the single-application flow for `folder`.
pub fn deploy_application<D: DeploymentPort, C: Clock>(
    ctx: &AppContext<D, C>,
    folder: &Path,
    resource_group: &str,
    dry_run: bool,
) -> Result<DeploymentOutcome, ApplicationFailure> {
    let mut stage = DeploymentStage::Discovered;
    let fail = |stage, error| ApplicationFailure { folder: folder.to_path_buf(), stage, error };

    let config_path = discover::locate_config(folder).map_err(|e| fail(stage, e))?;
    let document = ConfigDocument::load(&config_path).map_err(|e| fail(stage, e))?;

    let declared = document.declared_resource_group().map_err(|e| fail(stage, e))?;
    if declared != resource_group {
        return Err(fail(
            stage,
            AppError::ResourceGroupMismatch {
                config: config_path.display().to_string(),
                declared: declared.to_string(),
                supplied: resource_group.to_string(),
            },
        ));
    }
    let app_name = document.app_name().map_err(|e| fail(stage, e))?.to_string();
    stage = DeploymentStage::Validated;

    let rendered = render::execute(&config_path, &ctx.settings().output).map_err(|e| {
        fail(
            stage,
            AppError::RenderFailure {
                config: config_path.display().to_string(),
                details: e.to_string(),
            },
        )
    })?;
    ensure_rendered(&rendered).map_err(|e| fail(stage, e))?;
    stage = DeploymentStage::Rendered;

    let name = deployment_name(&app_name, ctx.clock().now());
    let request = DeploymentRequest {
        name: &name,
        resource_group,
        template_file: &rendered.template_path,
        parameters_file: &rendered.parameters_path,
    };
    let command = ctx.deployer().describe(&request);

    if !dry_run {
        ctx.deployer().create_deployment(&request).map_err(|e| fail(stage, e))?;
    }

    Ok(DeploymentOutcome {
        folder: folder.to_path_buf(),
        config_path,
        deployment_name: name,
        resource_group: resource_group.to_string(),
        template_path: rendered.template_path,
        parameters_path: rendered.parameters_path,
        command,
        dry_run,
    })
}

/// Both rendered documents must exist before anything is submitted.
fn ensure_rendered(rendered: &RenderOutcome) -> Result<(), AppError> {
    for path in [&rendered.template_path, &rendered.parameters_path] {
        if !path.is_file() {
            return Err(AppError::OutputMissing(path.display().to_string()));
        }
    }
    Ok(())
}
