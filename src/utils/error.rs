use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required query parameter: {name}")]
    MissingParameter { name: String },

    #[error("Server error: {message}")]
    Server { message: String },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingParameter { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            RelayError::Http(_) => "Could not reach the upstream site".to_string(),
            RelayError::Io(e) => format!("File or socket error: {}", e),
            RelayError::Config { .. }
            | RelayError::ConfigValidation { .. }
            | RelayError::InvalidConfigValue { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RelayError::Http(_) => "Check network access to the upstream site and its base URL",
            RelayError::Io(_) => "Check that the port is free and the config file is readable",
            RelayError::InvalidUrl(_) => "Use a full http:// or https:// URL for the upstream",
            RelayError::Config { .. }
            | RelayError::ConfigValidation { .. }
            | RelayError::InvalidConfigValue { .. } => {
                "Fix the value in the TOML file or pass it on the command line"
            }
            RelayError::MissingParameter { .. } => "Pass ?domains=a.com,b.com",
            _ => "Retry, and run with --verbose for details",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ Request failed: {}", self);
        }

        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
