//! Fully-qualified Azure resource identifiers.

use std::fmt;

use crate::domain::AppConfig;

/// Resource types the renderer needs identifiers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    UserAssignedIdentity,
    ManagedEnvironment,
    KeyVault,
}

impl ResourceKind {
    /// `{namespace}/{type}` segment of the resource id.
    pub fn provider_path(self) -> &'static str {
        match self {
            ResourceKind::UserAssignedIdentity => {
                "Microsoft.ManagedIdentity/userAssignedIdentities"
            }
            ResourceKind::ManagedEnvironment => "Microsoft.App/managedEnvironments",
            ResourceKind::KeyVault => "Microsoft.KeyVault/vaults",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    subscription_id: String,
    resource_group: String,
    kind: ResourceKind,
    name: String,
}

impl ResourceId {
    pub fn new(subscription_id: &str, resource_group: &str, kind: ResourceKind, name: &str) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            resource_group: resource_group.to_string(),
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}/{}",
            self.subscription_id,
            self.resource_group,
            self.kind.provider_path(),
            self.name
        )
    }
}

/// The identifiers a rendered deployment refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIds {
    pub runtime_identity: ResourceId,
    pub deployment_identity: ResourceId,
    pub managed_environment: ResourceId,
    pub key_vault: ResourceId,
}

impl ResourceIds {
    pub fn for_config(config: &AppConfig) -> Self {
        let id = |kind, name: &str| {
            ResourceId::new(&config.subscription_id, &config.resource_group, kind, name)
        };

        Self {
            runtime_identity: id(ResourceKind::UserAssignedIdentity, &config.identities.runtime),
            deployment_identity: id(
                ResourceKind::UserAssignedIdentity,
                &config.identities.deployment,
            ),
            managed_environment: id(
                ResourceKind::ManagedEnvironment,
                &config.app.managed_environment,
            ),
            key_vault: id(ResourceKind::KeyVault, &config.key_vault),
        }
    }
}
