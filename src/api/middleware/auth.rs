//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, TOKEN_COOKIE_NAME};
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated principal extracted from the JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Check if the caller has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Pull the token from the `Authorization: Bearer` header, falling
/// back to the `token` cookie browser clients carry.
fn token_from_request(request: &Request) -> Option<String> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX));

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(request.headers())
        .get(TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token, then injects the CurrentUser
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_request(&request).ok_or(AppError::Unauthenticated)?;

    let claims = state.auth_service.verify_token(&token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: UserRole::from(claims.role.as_str()),
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
