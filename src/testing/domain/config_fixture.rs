use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::domain::{AppConfig, ConfigDocument};

/// Builder for application configuration documents used in unit tests.
#[derive(Debug, Clone)]
pub struct ConfigFixture {
    value: Value,
}

impl Default for ConfigFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ConfigFixture {
    pub fn new() -> Self {
        Self {
            value: json!({
                "subscriptionId": "00000000-0000-0000-0000-000000000000",
                "resourceGroup": { "name": "rg-orders-dev" },
                "location": "westeurope",
                "keyVault": { "name": "kv-orders-dev" },
                "containerRegistry": {
                    "server": "acrorders.azurecr.io",
                    "username": "acrorders",
                    "passwordSecretName": "acr-password"
                },
                "managedIdentities": {
                    "runtime": "id-orders-runtime",
                    "deployment": "id-orders-deploy"
                },
                "containerApp": {
                    "name": "orders-api",
                    "image": "acrorders.azurecr.io/orders-api:1.4.2",
                    "targetPort": 8080,
                    "managedEnvironment": "cae-shared-dev",
                    "ingress": {
                        "enabled": true,
                        "external": true,
                        "transport": "auto",
                        "allowInsecure": false
                    },
                    "resources": { "cpu": 0.5, "memory": "1Gi" },
                    "scale": { "minReplicas": 1, "maxReplicas": 3 },
                    "command": [],
                    "args": [],
                    "volumes": []
                },
                "environmentVariables": {
                    "secrets": {},
                    "nonSecrets": {}
                }
            }),
        }
    }

    /// Replace the value at a JSON pointer, creating the last key if needed.
    pub fn set(mut self, pointer: &str, value: Value) -> Self {
        let (parent, key) = split_pointer(pointer);
        let target = self.value.pointer_mut(parent).expect("fixture pointer parent must exist");
        target[key] = value;
        self
    }

    /// Remove the key at a JSON pointer.
    pub fn remove(mut self, pointer: &str) -> Self {
        let (parent, key) = split_pointer(pointer);
        if let Some(Value::Object(map)) = self.value.pointer_mut(parent) {
            map.remove(key);
        }
        self
    }

    pub fn with_resource_group(self, name: &str) -> Self {
        self.set("/resourceGroup/name", json!(name))
    }

    pub fn with_app_name(self, name: &str) -> Self {
        self.set("/containerApp/name", json!(name))
    }

    pub fn with_ingress_enabled(self, enabled: bool) -> Self {
        self.set("/containerApp/ingress/enabled", json!(enabled))
    }

    pub fn with_secret(mut self, key: &str, vault_secret: &str) -> Self {
        self.value["environmentVariables"]["secrets"][key] = json!(vault_secret);
        self
    }

    pub fn with_variable(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.value["environmentVariables"]["nonSecrets"][key] = value.into();
        self
    }

    pub fn with_volume(mut self, name: &str, mount_path: &str, storage_name: &str) -> Self {
        let volumes = self.value["containerApp"]["volumes"]
            .as_array_mut()
            .expect("fixture volumes must be an array");
        volumes.push(json!({ "name": name, "mountPath": mount_path, "storageName": storage_name }));
        self
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.value).expect("fixture must serialize")
    }

    /// Write the document as `file_name` inside `dir` and return its path.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        fs::write(&path, self.to_json_string()).expect("failed to write fixture");
        path
    }

    pub fn resolve(&self) -> AppConfig {
        ConfigDocument::parse(Path::new("fixture/variable.json"), &self.to_json_string())
            .and_then(|doc| doc.resolve())
            .expect("fixture must resolve")
    }
}

fn split_pointer(pointer: &str) -> (&str, &str) {
    match pointer.rfind('/') {
        Some(index) => (&pointer[..index], &pointer[index + 1..]),
        None => ("", pointer),
    }
}
