use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Fallback shown when the backend gave no usable message.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Shown for requests that never produced a response.
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server or the response never arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a failure envelope. `errors` carries its
    /// messages verbatim.
    #[error("api error (status {status})")]
    Api { status: u16, errors: Vec<String> },

    /// The response body did not match the expected envelope shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected client-side before any request was made.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status for backend failures, 0 for everything else.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Api { status, .. } => *status,
            _ => 0,
        }
    }

    /// The one line shown to the user. Backend messages win; each other kind
    /// has a fixed fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => NETWORK_ERROR.to_string(),
            ApiError::Api { errors, .. } => errors
                .first()
                .cloned()
                .unwrap_or_else(|| GENERIC_ERROR.to_string()),
            ApiError::Decode(_) => GENERIC_ERROR.to_string(),
            ApiError::Validation(message) => message.clone(),
        }
    }
}
