use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_posts, update_post,
};
use crate::presentation::middleware::auth::bearer_auth_middleware;

/// Every post route requires a valid bearer token; the admin check for the
/// mutating verbs happens inside the handlers.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/{id}",
            get(get_post)
                .put(update_post)
                .patch(update_post)
                .delete(delete_post),
        )
        .layer(middleware::from_fn_with_state(
            state,
            bearer_auth_middleware,
        ))
}
