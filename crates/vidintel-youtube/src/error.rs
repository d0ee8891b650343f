use thiserror::Error;

/// Errors returned by the YouTube Data API client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error envelope on a non-2xx response.
    #[error("YouTube API error ({status}, {reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    /// A 403 whose reason points at quota or rate limiting. Never retried.
    #[error("YouTube quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not parseable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
