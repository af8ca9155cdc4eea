use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    /// The backend answered with `isSuccess: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Whether the error means the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound(_) | ApiError::Server { status: 404, .. }
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::Network(format!("Request timed out: {err}"));
        }
        if err.is_connect() {
            return ApiError::Network(format!("Connection failed: {err}"));
        }
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        if err.is_builder() {
            return ApiError::InvalidRequest(err.to_string());
        }
        match err.status() {
            Some(status) => ApiError::Server {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => ApiError::Network(err.to_string()),
        }
    }
}
