use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::category_service::CategoryService;
use crate::application::post_service::PostService;
use crate::data::repositories::postgres::category_repository::PostgresCategoryRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository, PostgresCategoryRepository>>,
    pub(crate) category_service: Arc<CategoryService<PostgresCategoryRepository>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        post_service: Arc<PostService<PostgresPostRepository, PostgresCategoryRepository>>,
        category_service: Arc<CategoryService<PostgresCategoryRepository>>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service,
            post_service,
            category_service,
            jwt,
        }
    }
}
