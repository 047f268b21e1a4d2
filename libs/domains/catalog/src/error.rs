use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::CatalogId;

/// Message shown for every missing catalog entity.
pub const NOT_FOUND_MESSAGE: &str = "The requested page does not exist.";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(CatalogId),

    #[error("Tag not found: {0}")]
    TagNotFound(CatalogId),

    #[error("Product not found: {0}")]
    ProductNotFound(CatalogId),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Invalid catalog snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(id) => {
                tracing::debug!(category_id = id, "Category lookup missed");
                AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
            }
            CatalogError::TagNotFound(id) => {
                tracing::debug!(tag_id = id, "Tag lookup missed");
                AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
            }
            CatalogError::ProductNotFound(id) => {
                tracing::debug!(product_id = id, "Product lookup missed");
                AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
            }
            CatalogError::Repository(msg) => AppError::Repository(msg),
            CatalogError::InvalidSnapshot(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Repository(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidSnapshot(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_missing_entities_map_to_404_with_shared_message() {
        for err in [
            CatalogError::CategoryNotFound(1),
            CatalogError::TagNotFound(2),
            CatalogError::ProductNotFound(3),
        ] {
            match AppError::from(err) {
                AppError::NotFound(msg) => assert_eq!(msg, NOT_FOUND_MESSAGE),
                other => panic!("expected NotFound, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_repository_failure_is_server_error() {
        let response = CatalogError::Repository("disk gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
