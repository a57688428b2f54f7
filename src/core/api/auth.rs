use tokio::sync::OnceCell;
use tracing::debug;

use crate::core::error::AzaError;
use crate::platform::{NativePlatform, Platform};

pub const DEFAULT_SCOPE: &str = "https://ai.azure.com/.default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// A bearer token handed in directly (`AZA_TOKEN`).
    Static(String),
    /// Ask the Azure CLI for a token of the given scope.
    AzureCli { scope: String },
}

/// Resolves the bearer token once and hands out the cached value afterwards.
pub struct TokenProvider {
    source: TokenSource,
    cached: OnceCell<String>,
}

impl TokenProvider {
    pub fn new(source: TokenSource) -> Self {
        Self {
            source,
            cached: OnceCell::new(),
        }
    }

    pub async fn token(&self) -> Result<&str, AzaError> {
        let token = self
            .cached
            .get_or_try_init(|| acquire(&self.source))
            .await?;
        Ok(token.as_str())
    }
}

async fn acquire(source: &TokenSource) -> Result<String, AzaError> {
    match source {
        TokenSource::Static(token) => {
            let token = token.trim();
            if token.is_empty() {
                return Err(AzaError::Auth("AZA_TOKEN is set but empty".to_string()));
            }
            Ok(token.to_string())
        }
        TokenSource::AzureCli { scope } => azure_cli_token(scope).await,
    }
}

async fn azure_cli_token(scope: &str) -> Result<String, AzaError> {
    debug!("Requesting access token from Azure CLI (scope: {})", scope);
    let output = NativePlatform::azure_cli()
        .args([
            "account",
            "get-access-token",
            "--scope",
            scope,
            "--query",
            "accessToken",
            "-o",
            "tsv",
        ])
        .output()
        .await
        .map_err(|e| {
            AzaError::Auth(format!("{} ({})", NativePlatform::azure_cli_missing_hint(), e))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AzaError::Auth(format!(
            "az account get-access-token failed: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(AzaError::Auth(
            "Azure CLI returned an empty access token".to_string(),
        ));
    }
    Ok(token)
}
