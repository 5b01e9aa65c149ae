use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Wire shape for every failure except a failed login, which answers
/// `{"notFound": true}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),
    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("login failed")]
    LoginFailed,
    #[error("invalid access token")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn body(message: String, errors: Option<BTreeMap<String, String>>) -> Json<ErrorBody> {
    Json(ErrorBody { message, errors })
}

/// Maps a unique-constraint violation onto the field it guards, so a
/// registration that loses the insert race still reports like a validation
/// failure.
fn unique_violation_field(err: &anyhow::Error) -> Option<&'static str> {
    let db_err = err.downcast_ref::<sqlx::Error>()?.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    match db_err.constraint() {
        Some(c) if c.contains("email") => Some("email"),
        Some(c) if c.contains("name") => Some("name"),
        _ => Some("record"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                body("validation failed".into(), Some(errors)),
            )
                .into_response(),
            AppError::LoginFailed => {
                (StatusCode::BAD_REQUEST, Json(json!({ "notFound": true }))).into_response()
            }
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                body("invalid access token".into(), None),
            )
                .into_response(),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                body(format!("{what} not found"), None),
            )
                .into_response(),
            AppError::Internal(err) => {
                if let Some(field) = unique_violation_field(&err) {
                    let mut errors = BTreeMap::new();
                    errors.insert(field.to_string(), format!("{field} already exists"));
                    return (
                        StatusCode::BAD_REQUEST,
                        body("validation failed".into(), Some(errors)),
                    )
                        .into_response();
                }
                error!(error = %err, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body("internal error".into(), None),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let mut errors = BTreeMap::new();
        errors.insert("name".to_string(), "too short".to_string());
        let resp = AppError::Validation(errors).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn forbidden_and_not_found_statuses() {
        assert_eq!(
            AppError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("user").into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn failed_login_body_is_not_found_marker() {
        let resp = AppError::LoginFailed.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(value, json!({ "notFound": true }));
    }

    #[tokio::test]
    async fn error_body_omits_empty_errors() {
        let resp = AppError::NotFound("user").into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(value, json!({ "message": "user not found" }));
    }
}
