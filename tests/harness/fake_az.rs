use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variable naming an application whose deployments the fake rejects.
pub(crate) const FAIL_APP_ENV: &str = "FAKE_AZ_FAIL_APP";

pub(crate) struct FakeAz {
    _root: TempDir,
    bin: PathBuf,
    log_file: PathBuf,
}

impl FakeAz {
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir for fake az");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");
        let log_file = root.path().join("az.log");
        let bin = bin_dir.join("az");

        let script_content = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"

case "$1" in
    version)
        echo '{{"azure-cli": "2.61.0"}}'
        ;;
    deployment)
        if [ -n "${fail}" ]; then
            case "$*" in
                *"--name ${fail}-"*)
                    echo "ERROR: InvalidTemplateDeployment" >&2
                    exit 1
                    ;;
            esac
        fi
        echo '{{"properties": {{"provisioningState": "Succeeded"}}}}'
        ;;
esac

exit 0
"#,
            log = log_file.to_string_lossy(),
            fail = FAIL_APP_ENV,
        );

        fs::write(&bin, script_content).expect("Failed to write az script");

        let mut perms = fs::metadata(&bin).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&bin, perms).expect("Failed to set permissions");

        Self { _root: root, bin, log_file }
    }

    pub(crate) fn bin(&self) -> &Path {
        &self.bin
    }

    pub(crate) fn log(&self) -> String {
        fs::read_to_string(&self.log_file).unwrap_or_default()
    }

    /// Logged `az deployment ...` invocations, one per line.
    pub(crate) fn deployments(&self) -> Vec<String> {
        self.log().lines().filter(|line| line.starts_with("deployment ")).map(String::from).collect()
    }
}
