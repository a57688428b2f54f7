use thiserror::Error;

/// Maximum number of response-body characters kept on an API failure.
pub const ERROR_BODY_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum AzaError {
    /// The invocation itself is wrong; raised before any network call.
    #[error("{0}")]
    Usage(String),

    #[error("HTTP {status} {reason}: {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("invalid endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl AzaError {
    pub fn usage(msg: impl Into<String>) -> Self {
        AzaError::Usage(msg.into())
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, AzaError::Usage(_))
    }

    /// HTTP status of an API failure, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AzaError::Api { status, .. } => Some(*status),
            AzaError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Process exit code the shell should use for this failure.
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() { 2 } else { 1 }
    }
}

/// Truncate `text` to at most `limit` characters on a char boundary.
pub fn truncate_body(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
