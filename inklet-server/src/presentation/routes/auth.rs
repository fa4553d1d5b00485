use axum::Router;
use axum::middleware;
use axum::routing::post;

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{login, logout, register};
use crate::presentation::middleware::auth::bearer_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected = Router::new().route("/logout", post(logout)).layer(
        middleware::from_fn_with_state(state, bearer_auth_middleware),
    );

    public.merge(protected)
}
