//! Resource template and parameters document rendering.
//!
//! Both documents are derived from one ordered list of [`Parameter`]s, so every
//! parameter declared in the template has exactly one binding in the
//! parameters document.

use serde_json::{Map, Value, json};

use crate::domain::config::REGISTRY_PASSWORD_SECRET;
use crate::domain::resource_id::ResourceIds;
use crate::domain::{AppConfig, IngressConfig};

pub const TEMPLATE_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#";
pub const PARAMETERS_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2019-04-01/deploymentParameters.json#";
pub const CONTENT_VERSION: &str = "1.0.0.0";
pub const CONTAINER_APP_TYPE: &str = "Microsoft.App/containerApps";
pub const CONTAINER_APP_API_VERSION: &str = "2023-05-01";

/// Parameters every rendered template declares, in declaration order.
pub const FIXED_PARAMETER_NAMES: &[&str] = &[
    "location",
    "containerAppName",
    "containerImage",
    "targetPort",
    "managedEnvironmentId",
    "runtimeIdentityId",
    "deploymentIdentityId",
    "registryServer",
    "registryUsername",
    "registryPassword",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Int,
    SecureString,
}

impl ParameterType {
    fn as_str(self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Int => "int",
            ParameterType::SecureString => "securestring",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterBinding {
    Literal(Value),
    /// Secret resolved by the platform from the configured key vault.
    KeyVaultSecret(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterType,
    pub binding: ParameterBinding,
}

impl Parameter {
    fn literal(name: &str, kind: ParameterType, value: impl Into<Value>) -> Self {
        Self { name: name.to_string(), kind, binding: ParameterBinding::Literal(value.into()) }
    }

    fn secret(name: &str, vault_secret: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ParameterType::SecureString,
            binding: ParameterBinding::KeyVaultSecret(vault_secret.to_string()),
        }
    }
}

/// A rendered template and its parameters document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDeployment {
    pub template: Value,
    pub parameters: Value,
}

impl RenderedDeployment {
    pub fn render(config: &AppConfig) -> Self {
        let ids = ResourceIds::for_config(config);
        let parameters = parameter_list(config, &ids);

        Self {
            template: template_document(config, &parameters),
            parameters: parameters_document(&parameters, &ids.key_vault.to_string()),
        }
    }
}

/// Fixed parameters followed by one per secret and one per plain variable.
pub fn parameter_list(config: &AppConfig, ids: &ResourceIds) -> Vec<Parameter> {
    let text = ParameterType::String;

    let mut parameters = vec![
        Parameter::literal("location", text, config.location.as_str()),
        Parameter::literal("containerAppName", text, config.app.name.as_str()),
        Parameter::literal("containerImage", text, config.app.image.as_str()),
        Parameter::literal("targetPort", ParameterType::Int, config.app.target_port),
        Parameter::literal("managedEnvironmentId", text, ids.managed_environment.to_string()),
        Parameter::literal("runtimeIdentityId", text, ids.runtime_identity.to_string()),
        Parameter::literal("deploymentIdentityId", text, ids.deployment_identity.to_string()),
        Parameter::literal("registryServer", text, config.registry.server.as_str()),
        Parameter::literal("registryUsername", text, config.registry.username.as_str()),
        Parameter::secret("registryPassword", &config.registry.password_secret),
    ];

    parameters.extend(config.secrets.iter().map(|s| Parameter::secret(&s.key, &s.vault_secret)));
    parameters
        .extend(config.variables.iter().map(|v| Parameter::literal(&v.key, text, v.value.as_str())));

    parameters
}

fn param_ref(name: &str) -> String {
    format!("[parameters('{}')]", name)
}

fn template_document(config: &AppConfig, parameters: &[Parameter]) -> Value {
    let declarations: Map<String, Value> = parameters
        .iter()
        .map(|p| (p.name.clone(), json!({ "type": p.kind.as_str() })))
        .collect();

    json!({
        "$schema": TEMPLATE_SCHEMA,
        "contentVersion": CONTENT_VERSION,
        "parameters": declarations,
        "resources": [container_app_resource(config)],
    })
}

fn container_app_resource(config: &AppConfig) -> Value {
    let mut identities = Map::new();
    identities.insert(param_ref("runtimeIdentityId"), json!({}));
    identities.insert(param_ref("deploymentIdentityId"), json!({}));

    let mut secrets: Vec<Value> = config
        .secrets
        .iter()
        .map(|s| json!({ "name": s.secret_name(), "value": param_ref(&s.key) }))
        .collect();
    secrets.push(json!({
        "name": REGISTRY_PASSWORD_SECRET,
        "value": param_ref("registryPassword"),
    }));

    let env: Vec<Value> = config
        .secrets
        .iter()
        .map(|s| json!({ "name": s.key, "secretRef": s.secret_name() }))
        .chain(config.variables.iter().map(|v| json!({ "name": v.key, "value": param_ref(&v.key) })))
        .collect();

    let volume_mounts: Vec<Value> = config
        .app
        .volumes
        .iter()
        .map(|v| json!({ "volumeName": v.name, "mountPath": v.mount_path }))
        .collect();

    let volumes: Vec<Value> = config
        .app
        .volumes
        .iter()
        .map(|v| json!({ "name": v.name, "storageType": "AzureFile", "storageName": v.storage_name }))
        .collect();

    json!({
        "type": CONTAINER_APP_TYPE,
        "apiVersion": CONTAINER_APP_API_VERSION,
        "name": param_ref("containerAppName"),
        "location": param_ref("location"),
        "identity": {
            "type": "UserAssigned",
            "userAssignedIdentities": identities,
        },
        "properties": {
            "managedEnvironmentId": param_ref("managedEnvironmentId"),
            "configuration": {
                "activeRevisionsMode": "Single",
                "secrets": secrets,
                "registries": [{
                    "server": param_ref("registryServer"),
                    "username": param_ref("registryUsername"),
                    "passwordSecretRef": REGISTRY_PASSWORD_SECRET,
                }],
                "ingress": ingress(&config.app.ingress),
            },
            "template": {
                "containers": [{
                    "name": param_ref("containerAppName"),
                    "image": param_ref("containerImage"),
                    "command": config.app.command,
                    "args": config.app.args,
                    "env": env,
                    "resources": config.app.resources,
                    "volumeMounts": volume_mounts,
                }],
                "scale": config.app.scale,
                "volumes": volumes,
            },
        },
    })
}

fn ingress(ingress: &IngressConfig) -> Value {
    if !ingress.enabled {
        return Value::Null;
    }

    json!({
        "external": ingress.external,
        "targetPort": param_ref("targetPort"),
        "transport": ingress.transport,
        "allowInsecure": ingress.allow_insecure,
        "traffic": [{ "latestRevision": true, "weight": 100 }],
    })
}

fn parameters_document(parameters: &[Parameter], key_vault_id: &str) -> Value {
    let bindings: Map<String, Value> = parameters
        .iter()
        .map(|p| {
            let binding = match &p.binding {
                ParameterBinding::Literal(value) => json!({ "value": value }),
                ParameterBinding::KeyVaultSecret(secret) => json!({
                    "reference": {
                        "keyVault": { "id": key_vault_id },
                        "secretName": secret,
                    }
                }),
            };
            (p.name.clone(), binding)
        })
        .collect();

    json!({
        "$schema": PARAMETERS_SCHEMA,
        "contentVersion": CONTENT_VERSION,
        "parameters": bindings,
    })
}
