//! aca-deploy: Render Azure Container Apps templates from per-application configuration and deploy them.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DeployOptions, DeployResult, RenderOutcome, ToolOptions, deploy, render, settings,
};
pub use domain::{
    AppError, ApplicationFailure, BatchSummary, DeployTarget, DeploymentOutcome, DeploymentStage,
    Settings,
};
