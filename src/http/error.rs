//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with the documented status codes
//! and messages. Every failure path terminates the request with exactly one
//! response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Path id did not parse as a number (400)
    InvalidUserId,

    /// Create body missing name, email, or age (400)
    MissingFields,

    /// Email already held by another row (400)
    EmailExists,

    /// No row for the requested id (404)
    NotFound,

    /// Any other store failure (500, logged)
    Database(sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidUserId => (StatusCode::BAD_REQUEST, "Invalid user ID".to_string()),
            Self::MissingFields => (
                StatusCode::BAD_REQUEST,
                "Name, email, and age are required".to_string(),
            ),
            Self::EmailExists => (StatusCode::BAD_REQUEST, "Email already exists".to_string()),
            Self::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", e),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound => Self::NotFound,
            DbError::DuplicateEmail => Self::EmailExists,
            DbError::Sqlx(e) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body read failed");
        serde_json::from_slice(&bytes).expect("body is not JSON")
    }

    #[tokio::test]
    async fn invalid_id_is_400() {
        let response = ApiError::InvalidUserId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await, json!({ "error": "Invalid user ID" }));
    }

    #[tokio::test]
    async fn missing_fields_is_400() {
        let response = ApiError::MissingFields.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            json!({ "error": "Name, email, and age are required" })
        );
    }

    #[tokio::test]
    async fn email_exists_is_400() {
        let response = ApiError::EmailExists.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            json!({ "error": "Email already exists" })
        );
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, json!({ "error": "User not found" }));
    }

    #[tokio::test]
    async fn database_error_is_500_with_prefixed_message() {
        let err = ApiError::Database(sqlx::Error::PoolTimedOut);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        let message = body["error"].as_str().expect("error field");
        assert!(message.starts_with("Database error: "));
    }

    #[test]
    fn db_not_found_maps_to_404_variant() {
        assert!(matches!(ApiError::from(DbError::NotFound), ApiError::NotFound));
    }

    #[test]
    fn db_duplicate_maps_to_conflict_variant() {
        assert!(matches!(
            ApiError::from(DbError::DuplicateEmail),
            ApiError::EmailExists
        ));
    }
}
