//! Client error types.

use facecheck_models::ErrorKind;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Service returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Collapse the error onto the three-way taxonomy carried in outcomes.
    ///
    /// A reqwest decode failure means the server answered with a body we
    /// cannot read, so it counts as a remote fault, not a connectivity one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidInput(_) | ClientError::InvalidUrl(_) => ErrorKind::Validation,
            ClientError::RemoteStatus { .. }
            | ClientError::InvalidResponse(_)
            | ClientError::Json(_) => ErrorKind::Remote,
            ClientError::Network(e) => {
                if e.is_decode() {
                    ErrorKind::Remote
                } else {
                    ErrorKind::Connectivity
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ClientError::invalid_input("empty image").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ClientError::RemoteStatus {
                status: 500,
                body: String::new()
            }
            .kind(),
            ErrorKind::Remote
        );
        assert_eq!(
            ClientError::InvalidResponse("missing fields".into()).kind(),
            ErrorKind::Remote
        );
    }
}
