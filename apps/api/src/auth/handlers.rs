//! Axum route handlers for registration and login.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::session::{session_cookie, SessionData, SessionStore};
use crate::auth::users::{create_user, find_user_by_email, normalize_email, NewUser};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub name: String,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let email = normalize_email(&req.email);
    let name = req.name.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "name, email and password are required".to_string(),
        ));
    }

    let password_hash = hash_password_blocking(req.password).await?;
    let user_id = create_user(
        &state.db,
        NewUser {
            name,
            email: &email,
            password_hash: &password_hash,
            education: req.education.trim(),
            city: req.city.trim(),
        },
    )
    .await?;

    info!(%user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            message: "Registration successful! Please login.".to_string(),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password.".to_string());

    let user = find_user_by_email(&state.db, &normalize_email(&req.email)).await?;
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    // unknown emails verify against a dummy hash so both paths cost the same
    if !verify_password_blocking(req.password, stored).await? {
        return Err(invalid());
    }
    let user = user.ok_or_else(invalid)?;

    let cookie = state
        .sessions
        .create(&SessionData::new(user.id, user.name.clone()))
        .await?;

    info!(user_id = %user.id, "User logged in");
    Ok((
        [(SET_COOKIE, state.sessions.set_cookie(&cookie))],
        Json(LoginResponse {
            user_id: user.id,
            name: user.name,
        }),
    ))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = session_cookie(&headers) {
        state.sessions.destroy(cookie).await?;
    }
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, SessionStore::clear_cookie())],
    ))
}
