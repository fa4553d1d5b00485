use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unauthenticated")]
    Unauthenticated,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// 422 body: field name to the list of violated constraints.
#[derive(Debug, Serialize)]
struct FieldErrorsBody {
    errors: BTreeMap<String, Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Domain(err) => domain_error_response(err),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FieldErrorsBody {
                    errors: field_error_messages(&errors),
                }),
            )
                .into_response(),
            AppError::Unauthenticated => {
                error_response(StatusCode::UNAUTHORIZED, "unauthenticated".to_string())
            }
        }
    }
}

fn domain_error_response(err: DomainError) -> Response {
    match &err {
        DomainError::Validation { field, message } => {
            let mut errors = BTreeMap::new();
            errors.insert(field.to_string(), vec![message.to_string()]);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FieldErrorsBody { errors }),
            )
                .into_response()
        }
        DomainError::NotFound(_) => error_response(StatusCode::NOT_FOUND, err.to_string()),
        DomainError::AlreadyExists(_) | DomainError::Conflict(_) => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        DomainError::Forbidden => error_response(StatusCode::FORBIDDEN, err.to_string()),
        DomainError::InvalidCredentials => {
            error_response(StatusCode::UNAUTHORIZED, err.to_string())
        }
        DomainError::Unexpected(detail) => {
            error!(%detail, "unexpected domain error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

fn field_error_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::Value;
    use validator::Validate;

    use super::AppError;
    use crate::domain::error::DomainError;

    #[derive(Validate)]
    struct Dto {
        #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
        title: String,
    }

    async fn response_parts(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let body = serde_json::from_slice(&bytes).expect("body must be json");
        (status, body)
    }

    #[tokio::test]
    async fn unauthenticated_maps_to_401_with_error_key() {
        let (status, body) = response_parts(AppError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn forbidden_maps_to_403_with_error_key() {
        let (status, body) = response_parts(AppError::Domain(DomainError::Forbidden)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn domain_validation_maps_to_422_with_field_errors() {
        let err = AppError::Domain(DomainError::Validation {
            field: "category_id",
            message: "must reference an existing category",
        });
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["category_id"][0].is_string());
    }

    #[tokio::test]
    async fn dto_validation_maps_to_422_naming_the_field() {
        let dto = Dto {
            title: String::new(),
        };
        let errors = dto.validate().expect_err("dto must be invalid");
        let (status, body) = response_parts(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["errors"]["title"][0],
            "must be between 1 and 255 characters"
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let err = AppError::Domain(DomainError::NotFound("post id: 9".to_string()));
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn conflict_maps_to_409() {
        let err = AppError::Domain(DomainError::Conflict(
            "category is referenced by existing posts".to_string(),
        ));
        let (status, _) = response_parts(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn invalid_credentials_map_to_401() {
        let (status, _) = response_parts(AppError::Domain(DomainError::InvalidCredentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unexpected_maps_to_500_without_leaking_detail() {
        let err = AppError::Domain(DomainError::Unexpected("connection refused".to_string()));
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }
}
