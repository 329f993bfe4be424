/*
 * Responsibility
 * - app-wide AppError definition
 * - IntoResponse mapping: status code only, failure bodies stay empty
 * - detail (code/message/store error) goes to the server log, never the client
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest { code, message } => {
                tracing::debug!(code, %message, "bad request");
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { resource } => {
                tracing::debug!(resource, "not found");
                StatusCode::NOT_FOUND
            }
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        status.into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(db) => {
                // Keep the store failure in the server log only; the client
                // sees a uniform 500.
                tracing::error!(error = %db, "store call failed");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(res: Response) -> axum::body::Bytes {
        res.into_body().collect().await.expect("body").to_bytes()
    }

    #[tokio::test]
    async fn bad_request_is_400_with_empty_body() {
        let res = AppError::bad_request("MISSING_ID", "id is required").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_of(res).await.is_empty());
    }

    #[tokio::test]
    async fn not_found_is_404_with_empty_body() {
        let res = AppError::not_found("post").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(body_of(res).await.is_empty());
    }

    #[tokio::test]
    async fn repo_error_collapses_to_500_with_empty_body() {
        let e: AppError = RepoError::Db(sqlx::Error::PoolTimedOut).into();
        let res = e.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(res).await.is_empty());
    }
}
