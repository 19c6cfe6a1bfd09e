use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::{Diagnostic, Result};
use thiserror::Error;
use tracing::error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Authentication error: {0}")]
    #[diagnostic(code(meetlink::authentication))]
    Authentication(String),

    #[error("Not authenticated")]
    #[diagnostic(
        code(meetlink::not_authenticated),
        help("Visit /auth to authorize access to Google Calendar")
    )]
    NotAuthenticated,

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(meetlink::provider))]
    Provider(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(meetlink::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(meetlink::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(meetlink::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(meetlink::other))]
    Other(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                "Not authenticated. Please authenticate first.",
            )
                .into_response(),
            Error::Authentication(message) => {
                error!("Error retrieving tokens: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed").into_response()
            }
            Error::Provider(message) => {
                error!("Error creating event: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error creating event").into_response()
            }
            other => {
                error!("Internal error: {:?}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create authentication errors
pub fn authentication_error(message: &str) -> Error {
    Error::Authentication(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn provider_error(message: &str) -> Error {
    Error::Provider(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
