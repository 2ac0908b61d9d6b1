//! Trust Service error types.

/// Errors raised while talking to the Trust Service.
#[derive(Debug, thiserror::Error)]
pub enum TrustServiceError {
    /// The HTTP exchange itself failed.
    #[error("failed to reach trust service at {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The service answered with a non-success status and an unreadable body.
    #[error("trust service answered HTTP {status}")]
    Status { status: u16 },

    /// The request envelope could not be encoded.
    #[error("failed to encode trust request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body is not a trust verdict.
    #[error("failed to parse trust response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response carried neither a verdict nor errors.
    #[error("trust response carries no verdict")]
    EmptyResponse,

    #[error("failed to format request time: {0}")]
    Timestamp(#[from] time::error::Format),
}
