use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the `inklet-client` library.
pub enum ClientError {
    /// HTTP transport error (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or invalid token.
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed (admin required).
    #[error("forbidden")]
    Forbidden,

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// Invalid request or a validation failure.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result alias for `inklet-client` operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden,
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
