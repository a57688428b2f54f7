pub mod auth;
pub mod http;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::AzaError;

pub type Query = BTreeMap<String, String>;

/// One authenticated GET against the project API.
///
/// Implementations return the parsed JSON body on success. A body that is not
/// valid JSON comes back as `Value::String` holding the raw text, and an empty
/// body as `Value::Null`.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn fetch(&self, path: &str, query: &Query) -> Result<Value, AzaError>;
}

/// Percent-encode an identifier for use as a single path segment.
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
