use std::path::PathBuf;

/// Platform-specific operations abstracted behind a common interface.
/// Each OS provides its own `NativePlatform` implementation so call sites
/// remain free of `#[cfg]` blocks.
pub trait Platform {
    /// Build a **tokio** `Command` that invokes the Azure CLI.
    fn azure_cli() -> tokio::process::Command;

    /// Human-readable hint shown when the Azure CLI is not on PATH.
    fn azure_cli_missing_hint() -> &'static str;

    /// Root configuration directory for aza.
    /// Unix: `~/.aza`, Windows: `%APPDATA%\aza`.
    fn config_dir() -> PathBuf;
}

/// `AZA_HOME` overrides the platform default.
pub(crate) fn resolve_config_dir(default: PathBuf) -> PathBuf {
    match std::env::var("AZA_HOME") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => default,
    }
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::NativePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::NativePlatform;
