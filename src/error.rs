//! Errors surfaced by the request pipeline and service clients.
//!
//! Probe failures never appear here: the resolver swallows them and falls
//! back to the default origin.

/// Errors produced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, TLS, body read).
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status. A 401 has already
    /// cleared the session by the time the caller sees this.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded or the request body encoded.
    #[error("API response parse failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::HttpClientBuild(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
