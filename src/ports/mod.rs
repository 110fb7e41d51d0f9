mod clock;
mod deployment;

pub use clock::Clock;
pub use deployment::{DeploymentPort, DeploymentRequest};
