use crate::entities::user::{self, Entity as UserEntity, Role};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};
use thiserror::Error;
use tracing::debug;

use crate::api::error::ApiError;

/// Rejects the request unless it carries a valid bearer token of a user whose
/// role is one of `AuthState::roles`. The verified claims are put in the
/// request extensions for handlers.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or(AuthMiddlewareError::MissingToken)?;

    let claims = validate_token(&state, &token).await?;
    debug!(user_id = claims.user_id, role = %claims.role, "Authorized request");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub role: String,
    pub exp: usize,
}

/// Signing secret and lifetime of issued tokens.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Arc<str>,
    ttl_hours: i64,
}

impl TokenSettings {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        TokenSettings {
            secret: Arc::from(secret),
            ttl_hours,
        }
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub db: Arc<DatabaseConnection>,
    pub tokens: TokenSettings,
    pub roles: &'static [Role],
}

pub fn generate_token(
    settings: &TokenSettings,
    user_id: i32,
    role: Role,
) -> Result<String, AuthMiddlewareError> {
    if settings.ttl_hours <= 0 {
        return Err(AuthMiddlewareError::GenerationFail);
    }
    let ttl = Duration::try_hours(settings.ttl_hours).ok_or(AuthMiddlewareError::GenerationFail)?;
    let exp = Utc::now()
        .checked_add_signed(ttl)
        .ok_or(AuthMiddlewareError::GenerationFail)?
        .timestamp() as usize;

    let claims = Claims {
        user_id,
        role: role.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|_| AuthMiddlewareError::GenerationFail)
}

pub async fn validate_token(state: &AuthState, token: &str) -> Result<Claims, AuthMiddlewareError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.tokens.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AuthMiddlewareError::TokenInvalid)?
    .claims;

    let role = Role::from_str(&claims.role).map_err(|_| AuthMiddlewareError::TokenInvalid)?;

    // The role must still be the user's current one.
    let user = UserEntity::find_by_id(claims.user_id)
        .filter(user::Column::Role.eq(role))
        .one(&*state.db)
        .await?;
    if user.is_none() {
        return Err(AuthMiddlewareError::InvalidUserOrRole);
    }

    if !state.roles.contains(&role) {
        return Err(AuthMiddlewareError::Forbidden);
    }
    Ok(claims)
}

#[derive(Error, Debug)]
pub enum AuthMiddlewareError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Token is invalid or expired")]
    TokenInvalid,
    #[error("Invalid user id or role")]
    InvalidUserOrRole,
    #[error("Insufficient role for this operation")]
    Forbidden,
    #[error("Failed to generate token")]
    GenerationFail,
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
