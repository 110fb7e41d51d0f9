use serde_json::{Value, json};

/// A complete application configuration document.
pub(crate) fn app_config(resource_group: &str, app_name: &str) -> Value {
    json!({
        "subscriptionId": "11111111-2222-3333-4444-555555555555",
        "resourceGroup": { "name": resource_group },
        "location": "westeurope",
        "keyVault": { "name": "kv-shared" },
        "containerRegistry": {
            "server": "acrshared.azurecr.io",
            "username": "acrshared",
            "passwordSecretName": "acr-password"
        },
        "managedIdentities": {
            "runtime": format!("id-{}-runtime", app_name),
            "deployment": format!("id-{}-deploy", app_name)
        },
        "containerApp": {
            "name": app_name,
            "image": format!("acrshared.azurecr.io/{}:1.0.0", app_name),
            "targetPort": 8080,
            "managedEnvironment": "cae-shared",
            "ingress": {
                "enabled": true,
                "external": true,
                "transport": "http",
                "allowInsecure": false
            },
            "resources": { "cpu": 0.25, "memory": "0.5Gi" },
            "scale": { "minReplicas": 1, "maxReplicas": 2 },
            "command": [],
            "args": [],
            "volumes": []
        },
        "environmentVariables": {
            "secrets": { "API_KEY": format!("{}-api-key", app_name) },
            "nonSecrets": { "LOG_LEVEL": "info" }
        }
    })
}
