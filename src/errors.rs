use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Bad request error (invalid input).
    BadRequest {
        message: String,
        details: Option<String>,
    },
    /// The upstream API answered with a non-success status.
    Upstream {
        /// Upstream HTTP status, forwarded to the caller.
        status: u16,
        message: String,
        /// Upstream response body.
        details: String,
    },
    /// The upstream API answered with a payload of the wrong shape.
    InvalidResponse(String),
    /// Transport-level failure talking to the upstream API.
    ExternalApiError(String),
    /// The upstream circuit breaker is open.
    ServiceUnavailable(String),
    /// Internal server error.
    InternalError(String),
    /// Error with a client-facing context message.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::InvalidResponse(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::WithContext { source, .. } => source.status(),
        }
    }

    /// Whether the error already carries a message meant for the client.
    fn is_client_facing(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest { .. } | AppError::Upstream { .. } | AppError::InvalidResponse(_)
        )
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest { message, details } => match details {
                Some(details) => write!(f, "Bad request: {} ({})", message, details),
                None => write!(f, "Bad request: {}", message),
            },
            AppError::Upstream {
                status,
                message,
                details,
            } => write!(f, "{} [{}]: {}", message, status, details),
            AppError::InvalidResponse(msg) => write!(f, "Invalid upstream response: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// The body is always `{"error": ..., "details"?: ...}`.
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, details) = match self {
            AppError::BadRequest { message, details } => (message, details),
            AppError::Upstream {
                status: upstream_status,
                message,
                details,
            } => {
                tracing::warn!("Upstream API returned {}: {}", upstream_status, details);
                (message, Some(details))
            }
            AppError::InvalidResponse(msg) => {
                tracing::error!("Invalid upstream response: {}", msg);
                (msg, None)
            }
            AppError::ExternalApiError(msg) => {
                tracing::error!("External API error: {}", msg);
                ("External service error".to_string(), Some(msg))
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                ("Service unavailable".to_string(), Some(msg))
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), Some(msg))
            }
            AppError::WithContext { source, context } => {
                if source.is_client_facing() {
                    return (*source).into_response();
                }
                tracing::error!("Error with context: {} -> {}", context, source);
                let details = match *source {
                    AppError::ExternalApiError(msg)
                    | AppError::ServiceUnavailable(msg)
                    | AppError::InternalError(msg) => msg,
                    other => other.to_string(),
                };
                (context, Some(details))
            }
        };

        let body = match details {
            Some(details) => json!({ "error": error_message, "details": details }),
            None => json!({ "error": error_message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("Malformed record: {}", err))
    }
}

impl From<failsafe::Error<AppError>> for AppError {
    /// Unwraps a call made through the upstream circuit breaker.
    fn from(err: failsafe::Error<AppError>) -> Self {
        match err {
            failsafe::Error::Inner(e) => e,
            failsafe::Error::Rejected => {
                AppError::ServiceUnavailable("Upstream API temporarily unavailable".to_string())
            }
        }
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: f(),
        })
    }
}
