// Client error types
use std::collections::HashMap;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the staffdesk library.
///
/// Validation variants are produced before any request leaves the process.
/// Everything else comes from talking to the admin API.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    FieldErrors {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server rejected request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = HashMap::new();
        field_errors.insert(field.into(), message.clone());
        Error::FieldErrors { message, field_errors }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Error::Server { status, message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// True for failures caught locally before contacting the backend
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::FieldErrors { .. })
    }

    /// HTTP-style status for reporting; local failures map onto 400/500
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) | Error::FieldErrors { .. } => 400,
            Error::NotFound(_) => 404,
            Error::Server { status, .. } => *status,
            Error::Transport(e) => e.status().map(|s| s.as_u16()).unwrap_or(503),
            Error::Decode(_) => 502,
            Error::Url(_) | Error::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::FieldErrors { .. } => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Server { status, .. } => match status {
                401 => "UNAUTHORIZED",
                403 => "FORBIDDEN",
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                400..=499 => "BAD_REQUEST",
                _ => "SERVER_ERROR",
            },
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Decode(_) => "INVALID_RESPONSE",
            Error::Url(_) => "INVALID_URL",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}
