use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::access::{Capability, require};
use crate::domain::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateCategoryDto {
    #[validate(
        required(message = "this field is required"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters")
    )]
    pub(crate) name: Option<String>,
}

/// Absent fields are skipped, present fields carry the same constraints as on
/// creation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryResponseDto {
    pub(crate) data: CategoryDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryListResponseDto {
    pub(crate) data: Vec<CategoryDto>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Categories listed", body = CategoryListResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<CategoryListResponseDto>)> {
    let categories = state.category_service.list_categories().await?;

    Ok((
        StatusCode::OK,
        Json(CategoryListResponseDto {
            data: categories.into_iter().map(CategoryDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<CategoryResponseDto>)> {
    let category = state.category_service.get_category(id).await?;

    Ok((
        StatusCode::OK,
        Json(CategoryResponseDto {
            data: category.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreateCategoryDto>,
) -> AppResult<(StatusCode, Json<CategoryResponseDto>)> {
    require(auth.role, Capability::ManageContent)?;
    dto.validate()?;

    let req = CreateCategoryRequest {
        name: dto.name.unwrap_or_default(),
    };

    let category = state.category_service.create_category(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CategoryResponseDto {
            data: category.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateCategoryDto>,
) -> AppResult<(StatusCode, Json<CategoryResponseDto>)> {
    require(auth.role, Capability::ManageContent)?;
    dto.validate()?;

    let req = UpdateCategoryRequest { name: dto.name };

    let category = state.category_service.update_category(id, req).await?;
    Ok((
        StatusCode::OK,
        Json(CategoryResponseDto {
            data: category.into(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by posts"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require(auth.role, Capability::ManageContent)?;
    state.category_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
