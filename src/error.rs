/// Result type for listings API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised while talking to the listings API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to {operation} ({status})")]
    Http { operation: &'static str, status: u16 },

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode {operation} response")]
    Parse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
