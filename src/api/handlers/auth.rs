use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::api::extractors::auth::AuthUser;
use crate::config::Config;
use crate::domain::models::auth::{Claims, UserProfile};
use crate::domain::models::user::{NewUser, Role, User};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rand::rngs::OsRng;
use time::Duration;
use tower_cookies::{cookie::SameSite, Cookie, Cookies};
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if !payload.email.contains('@') {
        return Err(AppError::Validation("email is invalid".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let user = state
        .user_repo
        .create(&NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
            role: Role::Public,
        })
        .await?;

    info!("User registered: {}", user.id);

    Ok((StatusCode::CREATED, Json(profile(&user))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|_| AppError::Internal)?;

    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)?;

    let access_jwt = issue_access_token(&state.config, &user)?;
    set_access_cookie(&cookies, &access_jwt, state.config.token_ttl_minutes);

    info!("User logged in: {}", user.id);

    Ok(Json(profile(&user)))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build(("access_token", "")).path("/").into());
    info!("User logged out");
    Ok(StatusCode::OK)
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .user_repo
        .find_by_id(user.id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    Ok(Json(profile(&record)))
}

fn profile(user: &User) -> UserProfile {
    UserProfile {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    }
}

fn issue_access_token(config: &Config, user: &User) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        iss: config.auth_issuer.clone(),
        exp: (chrono::Utc::now() + chrono::Duration::minutes(config.token_ttl_minutes))
            .timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|_| AppError::Internal)
}

fn set_access_cookie(cookies: &Cookies, access: &str, ttl_minutes: i64) {
    let mut access_c = Cookie::new("access_token", access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(ttl_minutes));
    cookies.add(access_c);
}
