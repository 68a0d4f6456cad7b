//! Error types raised while binding parameters and encoding return values

use thiserror::Error;

/// Which side of a wrapped call an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while resolving parameters, before the handler runs
    Runtime,
    /// Raised while turning the handler's return value into a response
    Return,
}

/// Errors that can occur in a wrapped handler call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Parameter not found: {name}")]
    ParameterNotFound { name: String },

    #[error("Parameter type mismatch: {name} expected {expected}, got {value:?}")]
    ParameterTypeMismatch {
        name: String,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid return value: {0}")]
    InvalidReturnValue(String),
}

impl ApiError {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        ApiError::ParameterNotFound { name: name.into() }
    }

    pub(crate) fn mismatch(name: impl Into<String>, expected: &'static str, value: impl Into<String>) -> Self {
        ApiError::ParameterTypeMismatch {
            name: name.into(),
            expected,
            value: value.into(),
        }
    }

    /// Wrap an encoding failure
    pub fn invalid_return(cause: impl std::fmt::Display) -> Self {
        ApiError::InvalidReturnValue(cause.to_string())
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::ParameterNotFound { .. } | ApiError::ParameterTypeMismatch { .. } => ErrorKind::Runtime,
            ApiError::InvalidReturnValue(_) => ErrorKind::Return,
        }
    }

    /// True for parameter-resolution failures
    pub fn is_runtime(&self) -> bool {
        self.kind() == ErrorKind::Runtime
    }

    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Runtime => 400,
            ErrorKind::Return => 500,
        }
    }

    /// Convert to a Response
    pub fn to_response(&self) -> crate::Response {
        crate::Response::json(
            self.status_code(),
            serde_json::json!({
                "error": self.to_string()
            }),
        )
    }
}
