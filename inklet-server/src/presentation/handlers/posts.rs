use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::access::{Capability, require};
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::auth::UserDto;
use crate::presentation::handlers::categories::CategoryDto;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(
        required(message = "this field is required"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters")
    )]
    pub(crate) title: Option<String>,
    #[validate(
        required(message = "this field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub(crate) body: Option<String>,
    #[validate(required(message = "this field is required"))]
    pub(crate) category_id: Option<i64>,
}

/// Absent fields are skipped, present fields carry the same constraints as on
/// creation. Only present fields reach the store.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub(crate) body: Option<String>,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) user: UserDto,
    pub(crate) category: CategoryDto,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostResponseDto {
    pub(crate) data: PostDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListResponseDto {
    pub(crate) data: Vec<PostDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            user: post.author.into(),
            category: post.category.into(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Posts listed, newest first", body = PostListResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<PostListResponseDto>)> {
    let posts = state.post_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(PostListResponseDto {
            data: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let post = state.post_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostResponseDto { data: post.into() })))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    // Authorization strictly precedes payload validation.
    require(auth.role, Capability::ManageContent)?;
    dto.validate()?;

    let req = CreatePostRequest {
        title: dto.title.unwrap_or_default(),
        body: dto.body.unwrap_or_default(),
        category_id: dto.category_id.unwrap_or_default(),
    };

    let post = state.post_service.create_post(auth.user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponseDto { data: post.into() }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostResponseDto),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    require(auth.role, Capability::ManageContent)?;
    dto.validate()?;

    let req = UpdatePostRequest {
        title: dto.title,
        body: dto.body,
        category_id: dto.category_id,
    };

    let post = state.post_service.update_post(id, req).await?;
    Ok((StatusCode::OK, Json(PostResponseDto { data: post.into() })))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require(auth.role, Capability::ManageContent)?;
    state.post_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
