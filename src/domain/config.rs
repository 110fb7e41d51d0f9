//! Application configuration document model.
//!
//! A configuration document is parsed in two steps: a permissive raw form that
//! mirrors the JSON layout (every field optional), then resolution into
//! [`AppConfig`], where missing fields are reported by their dotted key path.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::AppError;
use crate::domain::naming::secret_name;
use crate::domain::template::FIXED_PARAMETER_NAMES;

/// Secret name reserved for the container registry password.
pub const REGISTRY_PASSWORD_SECRET: &str = "registry-password";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    subscription_id: Option<String>,
    resource_group: Option<RawNamed>,
    location: Option<String>,
    key_vault: Option<RawNamed>,
    container_registry: Option<RawRegistry>,
    managed_identities: Option<RawIdentities>,
    container_app: Option<RawContainerApp>,
    environment_variables: Option<RawEnvironment>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegistry {
    server: Option<String>,
    username: Option<String>,
    password_secret_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawIdentities {
    runtime: Option<String>,
    deployment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContainerApp {
    name: Option<String>,
    image: Option<String>,
    target_port: Option<u64>,
    managed_environment: Option<String>,
    ingress: Option<RawIngress>,
    resources: Option<RawResources>,
    scale: Option<RawScale>,
    #[serde(default)]
    command: Vec<String>,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    volumes: Vec<RawVolume>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIngress {
    enabled: Option<bool>,
    external: Option<bool>,
    transport: Option<String>,
    allow_insecure: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawResources {
    cpu: Option<f64>,
    memory: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScale {
    min_replicas: Option<u32>,
    max_replicas: Option<u32>,
    #[serde(default)]
    rules: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVolume {
    name: Option<String>,
    mount_path: Option<String>,
    storage_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvironment {
    #[serde(default)]
    secrets: Map<String, Value>,
    #[serde(default)]
    non_secrets: Map<String, Value>,
}

/// Fully resolved configuration for one container application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub subscription_id: String,
    pub resource_group: String,
    pub location: String,
    pub key_vault: String,
    pub registry: RegistryConfig,
    pub identities: IdentityNames,
    pub app: ContainerAppConfig,
    /// Secret-backed variables in document order, registry password excluded.
    pub secrets: Vec<SecretVariable>,
    /// Plain variables in document order.
    pub variables: Vec<PlainVariable>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    pub server: String,
    pub username: String,
    /// Key-vault secret holding the registry password.
    pub password_secret: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentityNames {
    pub runtime: String,
    pub deployment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerAppConfig {
    pub name: String,
    pub image: String,
    pub target_port: u16,
    pub managed_environment: String,
    pub ingress: IngressConfig,
    pub resources: ResourceShape,
    pub scale: ScaleConfig,
    pub command: Vec<String>,
    pub args: Vec<String>,
    pub volumes: Vec<VolumeMount>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngressConfig {
    pub enabled: bool,
    pub external: bool,
    pub transport: String,
    pub allow_insecure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceShape {
    pub cpu: f64,
    pub memory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConfig {
    pub min_replicas: u32,
    pub max_replicas: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub storage_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecretVariable {
    /// Environment variable name as written in the configuration.
    pub key: String,
    /// Name of the secret in the key vault.
    pub vault_secret: String,
}

impl SecretVariable {
    /// Name of the entry in the container app secrets block.
    pub fn secret_name(&self) -> String {
        secret_name(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlainVariable {
    pub key: String,
    pub value: String,
}

/// A parsed but not yet resolved configuration document.
#[derive(Debug)]
pub struct ConfigDocument {
    path: PathBuf,
    raw: RawConfig,
}

impl ConfigDocument {
    /// Read and parse the configuration document at `path`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => AppError::ConfigNotFound(path.display().to_string()),
            _ => AppError::Io(err),
        })?;
        Self::parse(path, &content)
    }

    /// Parse configuration content; `path` is used for error reporting only.
    pub fn parse(path: &Path, content: &str) -> Result<Self, AppError> {
        let raw: RawConfig = serde_json::from_str(content).map_err(|e| AppError::ConfigParse {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Ok(Self { path: path.to_path_buf(), raw })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The resource group this configuration is meant to be deployed into.
    pub fn declared_resource_group(&self) -> Result<&str, AppError> {
        let name = self.raw.resource_group.as_ref().and_then(|rg| rg.name.as_deref());
        self.required_str(name, "resourceGroup.name")
    }

    /// Application name used for deployment naming.
    pub fn app_name(&self) -> Result<&str, AppError> {
        let name = self.raw.container_app.as_ref().and_then(|app| app.name.as_deref());
        self.required_str(name, "containerApp.name")
    }

    /// Resolve every field and check the configuration invariants.
    pub fn resolve(&self) -> Result<AppConfig, AppError> {
        let raw = &self.raw;

        let registry = raw.container_registry.as_ref();
        let identities = raw.managed_identities.as_ref();
        let app = self.required(raw.container_app.as_ref(), "containerApp")?;
        let ingress = self.required(app.ingress.as_ref(), "containerApp.ingress")?;

        let (secrets, registry_secret_entry) = self.resolve_secrets()?;
        let variables = self.resolve_variables()?;

        let password_secret = match registry.and_then(|r| r.password_secret_name.as_deref()) {
            Some(name) if !name.trim().is_empty() => {
                if let Some(entry) = registry_secret_entry.filter(|entry| entry != name) {
                    return Err(self.invalid(format!(
                        "containerRegistry.passwordSecretName '{}' conflicts with secret entry '{}'",
                        name, entry
                    )));
                }
                name.to_string()
            }
            _ => match registry_secret_entry {
                Some(name) => name,
                None => {
                    return Err(self.missing("containerRegistry.passwordSecretName"));
                }
            },
        };

        let config = AppConfig {
            subscription_id: self
                .required_str(raw.subscription_id.as_deref(), "subscriptionId")?
                .to_string(),
            resource_group: self.declared_resource_group()?.to_string(),
            location: self.required_str(raw.location.as_deref(), "location")?.to_string(),
            key_vault: self
                .required_str(
                    raw.key_vault.as_ref().and_then(|kv| kv.name.as_deref()),
                    "keyVault.name",
                )?
                .to_string(),
            registry: RegistryConfig {
                server: self
                    .required_str(
                        registry.and_then(|r| r.server.as_deref()),
                        "containerRegistry.server",
                    )?
                    .to_string(),
                username: self
                    .required_str(
                        registry.and_then(|r| r.username.as_deref()),
                        "containerRegistry.username",
                    )?
                    .to_string(),
                password_secret,
            },
            identities: IdentityNames {
                runtime: self
                    .required_str(
                        identities.and_then(|i| i.runtime.as_deref()),
                        "managedIdentities.runtime",
                    )?
                    .to_string(),
                deployment: self
                    .required_str(
                        identities.and_then(|i| i.deployment.as_deref()),
                        "managedIdentities.deployment",
                    )?
                    .to_string(),
            },
            app: ContainerAppConfig {
                name: self.app_name()?.to_string(),
                image: self.required_str(app.image.as_deref(), "containerApp.image")?.to_string(),
                target_port: self.resolve_port(app.target_port)?,
                managed_environment: self
                    .required_str(
                        app.managed_environment.as_deref(),
                        "containerApp.managedEnvironment",
                    )?
                    .to_string(),
                ingress: IngressConfig {
                    enabled: self.required(ingress.enabled, "containerApp.ingress.enabled")?,
                    external: ingress.external.unwrap_or(false),
                    transport: ingress.transport.clone().unwrap_or_else(|| "auto".to_string()),
                    allow_insecure: ingress.allow_insecure.unwrap_or(false),
                },
                resources: ResourceShape {
                    cpu: app.resources.as_ref().and_then(|r| r.cpu).unwrap_or(0.5),
                    memory: app
                        .resources
                        .as_ref()
                        .and_then(|r| r.memory.clone())
                        .unwrap_or_else(|| "1Gi".to_string()),
                },
                scale: ScaleConfig {
                    min_replicas: app.scale.as_ref().and_then(|s| s.min_replicas).unwrap_or(0),
                    max_replicas: app.scale.as_ref().and_then(|s| s.max_replicas).unwrap_or(1),
                    rules: app.scale.as_ref().map(|s| s.rules.clone()).unwrap_or_default(),
                },
                command: app.command.clone(),
                args: app.args.clone(),
                volumes: self.resolve_volumes(&app.volumes)?,
            },
            secrets,
            variables,
        };

        self.validate(&config)?;
        Ok(config)
    }

    fn resolve_port(&self, port: Option<u64>) -> Result<u16, AppError> {
        let port = self.required(port, "containerApp.targetPort")?;
        match u16::try_from(port) {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(self.invalid(format!("containerApp.targetPort {} is out of range", port))),
        }
    }

    fn resolve_volumes(&self, volumes: &[RawVolume]) -> Result<Vec<VolumeMount>, AppError> {
        let mut seen = BTreeSet::new();
        let mut resolved = Vec::with_capacity(volumes.len());

        for (index, volume) in volumes.iter().enumerate() {
            let field = |name: &str| format!("containerApp.volumes[{}].{}", index, name);
            let name = self.required_str(volume.name.as_deref(), &field("name"))?;
            if !seen.insert(name.to_string()) {
                return Err(self.invalid(format!("duplicate volume name '{}'", name)));
            }
            resolved.push(VolumeMount {
                name: name.to_string(),
                mount_path: self
                    .required_str(volume.mount_path.as_deref(), &field("mountPath"))?
                    .to_string(),
                storage_name: self
                    .required_str(volume.storage_name.as_deref(), &field("storageName"))?
                    .to_string(),
            });
        }

        Ok(resolved)
    }

    /// Returns the dynamic secrets and, separately, the registry password
    /// vault reference when the secrets map carries one.
    fn resolve_secrets(&self) -> Result<(Vec<SecretVariable>, Option<String>), AppError> {
        let mut secrets = Vec::new();
        let mut registry_entry = None;

        let Some(env) = self.raw.environment_variables.as_ref() else {
            return Ok((secrets, registry_entry));
        };

        for (key, value) in &env.secrets {
            let field = format!("environmentVariables.secrets.{}", key);
            let vault_secret = match value {
                Value::String(s) if !s.trim().is_empty() => s.clone(),
                Value::Null => return Err(self.missing(&field)),
                Value::String(_) => return Err(self.missing(&field)),
                other => {
                    return Err(self.invalid(format!(
                        "{} must be a key-vault secret name, found {}",
                        field, other
                    )));
                }
            };

            if secret_name(key) == REGISTRY_PASSWORD_SECRET {
                registry_entry = Some(vault_secret);
                continue;
            }
            secrets.push(SecretVariable { key: key.clone(), vault_secret });
        }

        Ok((secrets, registry_entry))
    }

    fn resolve_variables(&self) -> Result<Vec<PlainVariable>, AppError> {
        let Some(env) = self.raw.environment_variables.as_ref() else {
            return Ok(Vec::new());
        };

        env.non_secrets
            .iter()
            .map(|(key, value)| {
                let field = format!("environmentVariables.nonSecrets.{}", key);
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null => return Err(self.missing(&field)),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(self.invalid(format!("{} must be a scalar value", field)));
                    }
                };
                Ok(PlainVariable { key: key.clone(), value })
            })
            .collect()
    }

    fn validate(&self, config: &AppConfig) -> Result<(), AppError> {
        let scale = &config.app.scale;
        if scale.min_replicas > scale.max_replicas {
            return Err(self.invalid(format!(
                "scale.minReplicas ({}) exceeds scale.maxReplicas ({})",
                scale.min_replicas, scale.max_replicas
            )));
        }

        let mut parameter_names: BTreeSet<&str> = FIXED_PARAMETER_NAMES.iter().copied().collect();
        let mut secret_names = BTreeSet::from([REGISTRY_PASSWORD_SECRET.to_string()]);

        let keys = config.secrets.iter().map(|s| s.key.as_str());
        for key in keys.chain(config.variables.iter().map(|v| v.key.as_str())) {
            if !is_valid_parameter_name(key) {
                return Err(self.invalid(format!(
                    "key '{}' cannot be used as a template parameter name",
                    key
                )));
            }
        }

        for secret in &config.secrets {
            let name = secret.secret_name();
            if !is_valid_secret_name(&name) {
                return Err(self.invalid(format!(
                    "secret key '{}' does not map to a valid secret name ('{}')",
                    secret.key, name
                )));
            }
            if !secret_names.insert(name.clone()) {
                return Err(self.invalid(format!(
                    "secret key '{}' collides with another secret named '{}'",
                    secret.key, name
                )));
            }
            if !parameter_names.insert(secret.key.as_str()) {
                return Err(self.invalid(format!(
                    "secret key '{}' collides with a template parameter",
                    secret.key
                )));
            }
        }

        for variable in &config.variables {
            if !parameter_names.insert(variable.key.as_str()) {
                return Err(self.invalid(format!(
                    "variable '{}' is declared twice or collides with a template parameter",
                    variable.key
                )));
            }
        }

        Ok(())
    }

    fn required<T>(&self, value: Option<T>, field: &str) -> Result<T, AppError> {
        value.ok_or_else(|| self.missing(field))
    }

    fn required_str<'a>(&self, value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(self.missing(field)),
        }
    }

    fn missing(&self, field: &str) -> AppError {
        AppError::ConfigFieldMissing {
            path: self.path.display().to_string(),
            field: field.to_string(),
        }
    }

    fn invalid(&self, reason: String) -> AppError {
        AppError::InvalidConfig { path: self.path.display().to_string(), reason }
    }
}

fn is_valid_parameter_name(key: &str) -> bool {
    !key.trim().is_empty() && !key.contains('\'')
}

fn is_valid_secret_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
}
