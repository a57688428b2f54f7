use std::path::PathBuf;

use super::{Platform, resolve_config_dir};

pub struct NativePlatform;

impl Platform for NativePlatform {
    fn azure_cli() -> tokio::process::Command {
        // az ships as a .cmd shim on Windows
        let mut cmd = tokio::process::Command::new("cmd");
        cmd.args(["/C", "az"]);
        cmd
    }

    fn azure_cli_missing_hint() -> &'static str {
        "Azure CLI ('az') not found. Install it and run 'az login', or set AZA_TOKEN."
    }

    fn config_dir() -> PathBuf {
        resolve_config_dir(
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("aza"),
        )
    }
}
