use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use crate::presentation::middleware::auth::bearer_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .patch(update_category)
                .delete(delete_category),
        )
        .layer(middleware::from_fn_with_state(
            state,
            bearer_auth_middleware,
        ))
}
