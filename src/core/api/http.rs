use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::auth::TokenProvider;
use super::{Query, ResourceClient};
use crate::core::error::{AzaError, ERROR_BODY_LIMIT, truncate_body};

const DEBUG_BODY_LIMIT: usize = 400;

/// reqwest-backed [`ResourceClient`] for a single project endpoint.
pub struct HttpResourceClient {
    base: String,
    api_version: String,
    tokens: TokenProvider,
    client: Client,
}

impl HttpResourceClient {
    pub fn new(
        base: impl Into<String>,
        api_version: impl Into<String>,
        tokens: TokenProvider,
    ) -> Result<Self, AzaError> {
        let base = base.into();
        // fail fast on a malformed endpoint, before a token is requested
        Url::parse(&base)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base,
            api_version: api_version.into(),
            tokens,
            client,
        })
    }

    pub fn build_url(&self, path: &str, query: &Query) -> Result<Url, AzaError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            join_url(&self.base, path)
        };
        let mut url = Url::parse(&raw)?;

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        if !pairs.iter().any(|(k, _)| k == "api-version") {
            pairs.push(("api-version".to_string(), self.api_version.clone()));
        }
        for (key, value) in query {
            match pairs.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value.clone(),
                None => pairs.push((key.clone(), value.clone())),
            }
        }
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
        Ok(url)
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn fetch(&self, path: &str, query: &Query) -> Result<Value, AzaError> {
        let url = self.build_url(path, query)?;
        let token = self.tokens.token().await?;

        debug!("[HTTP] -> GET {}", url);
        let res = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        debug!(
            "[HTTP] <- {} {}",
            status.as_u16(),
            truncate_body(&text, DEBUG_BODY_LIMIT)
        );

        if !status.is_success() {
            return Err(AzaError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body: truncate_body(&text, ERROR_BODY_LIMIT),
            });
        }
        Ok(parse_body(&text))
    }
}

fn join_url(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

/// Empty bodies become `Null`; bodies that are not JSON are kept as raw text.
pub fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
