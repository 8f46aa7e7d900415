use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("{0}")]
    ServerError(String),

    #[error("Invalid session token: {0}")]
    DecodeError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NetworkError(_) => "NETWORK_ERROR",
            AppError::ServerError(_) => "SERVER_ERROR",
            AppError::DecodeError(_) => "DECODE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Errors a user can fix by re-invoking the action that raised them.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::NetworkError(_) | AppError::ServerError(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InternalError(format!("Failed to parse response: {}", err))
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::DecodeError(err.to_string())
    }
}
impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::DecodeError(format!("subject is not valid base64: {}", err))
    }
}
impl From<std::string::FromUtf8Error> for AppError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        AppError::DecodeError(format!("subject is not valid UTF-8: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
