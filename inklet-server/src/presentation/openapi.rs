use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{
    AuthResponseDto, LoginDto, LogoutResponseDto, RegisterDto, UserDto,
};
use crate::presentation::handlers::categories::{
    CategoryDto, CategoryListResponseDto, CategoryResponseDto, CreateCategoryDto,
    UpdateCategoryDto,
};
use crate::presentation::handlers::posts::{
    CreatePostDto, PostDto, PostListResponseDto, PostResponseDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::categories::list_categories,
        crate::presentation::handlers::categories::get_category,
        crate::presentation::handlers::categories::create_category,
        crate::presentation::handlers::categories::update_category,
        crate::presentation::handlers::categories::delete_category
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            LogoutResponseDto,
            UserDto,
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            PostResponseDto,
            PostListResponseDto,
            CreateCategoryDto,
            UpdateCategoryDto,
            CategoryDto,
            CategoryResponseDto,
            CategoryListResponseDto
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "posts", description = "Post endpoints"),
        (name = "categories", description = "Category endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
