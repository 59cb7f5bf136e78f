//! Authentication service - registration, login, token verification
//! and profile management.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{is_self_register_role, Config};
use crate::domain::{Password, User, UserResponse, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// User plus bearer token, returned by register and login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// JWT bearer token, also delivered as the `token` cookie
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and issue its first token
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        phone: String,
        role: Option<String>,
    ) -> AppResult<AuthResponse>;

    /// Login and return the user with a fresh token
    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Fetch the caller's own profile
    async fn me(&self, user_id: Uuid) -> AppResult<User>;

    /// Update the caller's own profile. Role and email are fixed for
    /// the life of the account.
    async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        phone: Option<String>,
        profile_image: Option<String>,
    ) -> AppResult<User>;
}

/// Issue a signed bearer token for a user (shared by register and login)
fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(token)
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        phone: String,
        role: Option<String>,
    ) -> AppResult<AuthResponse> {
        // Stored lowercase so lookups are case-insensitive
        let email = email.to_lowercase();

        // Admin accounts are seeded, never self-registered
        let role = match role.as_deref() {
            None => UserRole::Customer,
            Some(r) if is_self_register_role(r) => UserRole::from(r),
            Some(_) => return Err(AppError::validation("Role must be customer or owner")),
        };

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::validation("Email already registered"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = User::new(Uuid::new_v4(), name, email, password_hash, role, phone);
        let user = self.uow.users().create(user).await?;

        let token = generate_token(&user, &self.config)?;

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let email = email.to_lowercase();
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let password_hash = match &user_result {
            Some(user) => user.password_hash.as_str(),
            None => dummy_hash,
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        match user_result {
            Some(user) if password_valid => {
                let token = generate_token(&user, &self.config)?;
                Ok(AuthResponse {
                    user: user.into(),
                    token,
                })
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn me(&self, user_id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        phone: Option<String>,
        profile_image: Option<String>,
    ) -> AppResult<User> {
        let mut user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;

        user.update_profile(name, phone, profile_image);
        self.uow.users().update(user).await
    }
}
