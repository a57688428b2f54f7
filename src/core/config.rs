use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::core::api::auth::{DEFAULT_SCOPE, TokenSource};
use crate::core::enrich::DEFAULT_CONCURRENCY;
use crate::platform::{NativePlatform, Platform};

pub const DEFAULT_API_VERSION: &str = "v1";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub token_scope: Option<String>,
}

/// Effective settings after file, environment and flags are layered.
#[derive(Debug, Clone, PartialEq)]
pub struct AzaConfig {
    pub project: Option<String>,
    pub api_version: String,
    pub concurrency: usize,
    pub page_size: Option<u32>,
    pub token_scope: String,
    pub token: Option<String>,
    pub debug: bool,
}

impl Default for AzaConfig {
    fn default() -> Self {
        Self {
            project: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            page_size: None,
            token_scope: DEFAULT_SCOPE.to_string(),
            token: None,
            debug: false,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    NativePlatform::config_dir().join("config.toml")
}

impl AzaConfig {
    /// Load `path`, or the default location when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path(), false),
        };
        if !explicit && !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let file: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(Self::from_file(file))
    }

    pub fn from_file(file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            project: file.project.filter(|p| !p.trim().is_empty()),
            api_version: file.api_version.unwrap_or(defaults.api_version),
            concurrency: file.concurrency.unwrap_or(defaults.concurrency),
            page_size: file.page_size,
            token_scope: file.token_scope.unwrap_or(defaults.token_scope),
            token: None,
            debug: false,
        }
    }

    /// Overlay `AZA_*` variables; `env` is injectable for tests.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(project) = get("AZA_PROJECT").or_else(|| get("PROJECT_ENDPOINT")) {
            self.project = Some(project);
        }
        if let Some(version) = get("AZA_API_VERSION") {
            self.api_version = version;
        }
        if let Some(raw) = get("AZA_CONCURRENCY") {
            self.concurrency = raw
                .trim()
                .parse()
                .with_context(|| format!("AZA_CONCURRENCY must be a number, got '{}'", raw))?;
        }
        if let Some(scope) = get("AZA_TOKEN_SCOPE") {
            self.token_scope = scope;
        }
        if let Some(token) = get("AZA_TOKEN") {
            self.token = Some(token);
        }
        if get("AZA_DEBUG").as_deref() == Some("1") {
            self.debug = true;
        }
        Ok(())
    }

    pub fn token_source(&self) -> TokenSource {
        match &self.token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::AzureCli {
                scope: self.token_scope.clone(),
            },
        }
    }
}
