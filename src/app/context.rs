use crate::domain::Settings;
use crate::ports::{Clock, DeploymentPort};

/// Application context holding dependencies for command execution.
pub struct AppContext<D: DeploymentPort, C: Clock> {
    deployer: D,
    clock: C,
    settings: Settings,
}

impl<D: DeploymentPort, C: Clock> AppContext<D, C> {
    /// Create a new application context.
    pub fn new(deployer: D, clock: C, settings: Settings) -> Self {
        Self { deployer, clock, settings }
    }

    /// Get a reference to the deployment port.
    pub fn deployer(&self) -> &D {
        &self.deployer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
