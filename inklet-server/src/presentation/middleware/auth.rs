use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::domain::user::Role;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// The authenticated actor, as resolved from the bearer token.
#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: i64,
    pub(crate) role: Role,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

pub(crate) async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next().ok_or(AppError::Unauthenticated)?;
    let token = parts.next().ok_or(AppError::Unauthenticated)?;
    if parts.next().is_some() {
        return Err(AppError::Unauthenticated);
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthenticated);
    }
    if token.trim().is_empty() {
        return Err(AppError::Unauthenticated);
    }

    let claims = state
        .jwt
        .verify_token(token.trim())
        .map_err(|_| AppError::Unauthenticated)?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
