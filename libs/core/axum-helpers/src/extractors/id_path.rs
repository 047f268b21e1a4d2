//! Numeric identifier path parameter extractor.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for a single positive integer path parameter.
///
/// Routes of the form `/items/{id}` only match numeric identifiers, so a
/// malformed or non-positive id is answered as a missing resource rather
/// than a bad request.
///
/// ```ignore
/// use axum_helpers::IdPath;
///
/// async fn view(IdPath(id): IdPath) -> String {
///     format!("Item {}", id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl IdPath {
    /// Parses a raw path segment.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<i64>().ok().filter(|id| *id > 0).map(IdPath)
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        IdPath::parse(&raw).ok_or_else(|| {
            tracing::debug!(path_param = %raw, "Rejecting non-numeric identifier");
            AppError::NotFound(ErrorCode::NotFound.default_message().to_string()).into_response()
        })
    }
}
