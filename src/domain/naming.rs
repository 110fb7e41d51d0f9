//! Naming rules shared by the renderer and the orchestrator.

use chrono::{DateTime, Utc};

/// Secret block name for a configuration key: lower-kebab-case.
pub fn secret_name(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Deployment name: application name suffixed with a second-resolution timestamp.
pub fn deployment_name(app_name: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", app_name, at.format("%Y%m%d%H%M%S"))
}
