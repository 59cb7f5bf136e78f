//! Authentication and profile handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{DEFAULT_JWT_EXPIRATION_HOURS, SECONDS_PER_HOUR, TOKEN_COOKIE_NAME};
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::AuthResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Amit Kumar")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
    /// Contact phone number
    #[validate(length(min = 1, message = "Phone is required"))]
    #[schema(example = "+91 98765 43213")]
    pub phone: String,
    /// Requested role, `customer` (default) or `owner`
    #[schema(example = "customer")]
    pub role: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "secret123")]
    pub password: String,
}

/// Profile update request, all fields optional
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[schema(example = "Amit K. Verma")]
    pub name: Option<String>,
    /// New contact phone number
    #[validate(length(min = 1, message = "Phone must not be empty"))]
    #[schema(example = "+91 98765 43213")]
    pub phone: Option<String>,
    /// New avatar URL
    pub profile_image: Option<String>,
}

/// Profile payload returned by the `/auth/me` endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

/// Build the `token` cookie browser clients authenticate with. The
/// lifetime matches the default token expiry.
fn session_cookie(token: &str) -> String {
    let max_age = DEFAULT_JWT_EXPIRATION_HOURS * SECONDS_PER_HOUR;
    format!("{TOKEN_COOKIE_NAME}={token}; Path=/; Max-Age={max_age}; SameSite=Lax")
}

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Create authenticated profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me).put(update_profile))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<AuthResponse>)> {
    let auth = state
        .auth_service
        .register(
            payload.name,
            payload.email,
            payload.password,
            payload.phone,
            payload.role,
        )
        .await?;

    let cookie = session_cookie(&auth.token);
    Ok((StatusCode::CREATED, [(header::SET_COOKIE, cookie)], Json(auth)))
}

/// Login and get a JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<([(header::HeaderName, String); 1], Json<AuthResponse>)> {
    let auth = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let cookie = session_cookie(&auth.token);
    Ok(([(header::SET_COOKIE, cookie)], Json(auth)))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state.auth_service.me(user.id).await?;

    Ok(Json(ProfileResponse {
        user: profile.into(),
    }))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/auth/me",
    tag = "Authentication",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state
        .auth_service
        .update_profile(user.id, payload.name, payload.phone, payload.profile_image)
        .await?;

    Ok(Json(ProfileResponse {
        user: profile.into(),
    }))
}
