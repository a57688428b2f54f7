use std::path::PathBuf;

use super::{Platform, resolve_config_dir};

pub struct NativePlatform;

impl Platform for NativePlatform {
    fn azure_cli() -> tokio::process::Command {
        tokio::process::Command::new("az")
    }

    fn azure_cli_missing_hint() -> &'static str {
        "Azure CLI ('az') not found in PATH. Install it and run 'az login', or set AZA_TOKEN."
    }

    fn config_dir() -> PathBuf {
        resolve_config_dir(
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".aza"),
        )
    }
}
