pub mod config;
pub mod deployment;
pub mod error;
pub mod naming;
pub mod resource_id;
pub mod settings;
pub mod template;

pub use config::{
    AppConfig, ConfigDocument, ContainerAppConfig, IngressConfig, PlainVariable, SecretVariable,
    VolumeMount,
};
pub use deployment::{
    ApplicationFailure, BatchSummary, DeployTarget, DeploymentOutcome, DeploymentStage,
};
pub use error::AppError;
pub use resource_id::{ResourceId, ResourceIds, ResourceKind};
pub use settings::{OutputSettings, Settings};
pub use template::RenderedDeployment;
