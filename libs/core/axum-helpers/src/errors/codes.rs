//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - a string identifier for clients (e.g. `"NOT_FOUND"`)
//! - an integer code for logs and metrics (e.g. `1004`)
//! - a default human-readable message
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NotFound;
//! assert_eq!(code.as_str(), "NOT_FOUND");
//! assert_eq!(code.code(), 1004);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request parameters could not be interpreted
    BadRequest,

    /// Requested resource was not found
    NotFound,

    /// The HTTP method is not supported by the route
    MethodNotAllowed,

    /// An unexpected internal server error occurred
    InternalError,

    // Read model errors (2000-2999)
    /// The backing read model failed to answer a query
    RepositoryError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier clients can match on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::RepositoryError => "REPOSITORY_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// Ranges:
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: read model errors
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MethodNotAllowed => 1010,
            Self::RepositoryError => 2001,
        }
    }

    /// Default user-facing message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "The request could not be understood",
            Self::NotFound => "The requested page does not exist.",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::RepositoryError => "The catalog is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::RepositoryError.as_str(), "REPOSITORY_ERROR");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::RepositoryError.code(), 2001);
        assert_eq!(ErrorCode::MethodNotAllowed.code(), 1010);
    }

    #[test]
    fn test_every_code_is_distinct() {
        let all = [
            ErrorCode::BadRequest,
            ErrorCode::NotFound,
            ErrorCode::MethodNotAllowed,
            ErrorCode::InternalError,
            ErrorCode::RepositoryError,
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(ErrorCode::code).collect();
        assert_eq!(codes.len(), all.len());
        assert!(all.iter().all(|c| (1000..3000).contains(&c.code())));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            ErrorCode::NotFound.default_message(),
            "The requested page does not exist."
        );
    }

    #[test]
    fn test_error_code_serialization_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::MethodNotAllowed).unwrap();
        assert_eq!(json, "\"METHOD_NOT_ALLOWED\"");
        let code: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code.to_string(), code.as_str());
    }
}
