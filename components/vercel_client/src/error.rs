use deployment_primitives::DeploymentId;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not authorized, check the API token and team")]
    Unauthorized,

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("file content is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("deployment {id} has no src directory")]
    MissingSourceTree { id: DeploymentId },

    #[error("invalid API URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ClientError {
    /// Map a non-success response to an error
    pub(crate) fn from_status(status: u16, what: impl Into<String>, body: &[u8]) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized,
            404 => ClientError::NotFound { what: what.into() },
            _ => ClientError::Api {
                status,
                message: error_message(body),
            },
        }
    }
}

fn error_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return parsed.error.message;
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "no details".to_string()
    } else {
        text.to_string()
    }
}
