//! Authentication routes.
//!
//! JSON API endpoints for employee signup, login, and profile lookup.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use officebar_core::UserId;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::middleware::{ApiJson, RequireAuth};
use crate::models::OrderHistoryEntry;
use crate::services::auth::AuthService;
use crate::state::AppState;

// ============================================================================
// Signup
// ============================================================================

/// Request to register a new employee.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Compact user view embedded in the signup response.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Response from a successful signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserView,
}

/// Register a new employee.
///
/// POST /api/auth/signup
///
/// # Errors
///
/// Returns 400 for missing fields, a malformed email, or a weak password;
/// 409 when the email is already registered.
#[instrument(skip(state, req))]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let auth = AuthService::new(state.users(), state.tokens());
    let (user, token) = auth
        .register(&req.email, &req.password, &req.first_name, &req.last_name)
        .await?;

    info!(user_id = %user.id, "New employee signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful",
            token,
            user: UserView {
                id: user.id,
                email: user.email.to_string(),
                name: user.full_name(),
            },
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// Request to log in.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User view embedded in the login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserView {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub order_history: Vec<OrderHistoryEntry>,
    pub favorites: Vec<String>,
}

/// Response from a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: LoginUserView,
}

/// Log an employee in.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns 400 for missing credentials, 401 when they do not match an
/// account.
#[instrument(skip(state, req))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth = AuthService::new(state.users(), state.tokens());
    let (user, token) = auth.authenticate(&req.email, &req.password).await?;

    info!(user_id = %user.id, "Employee logged in");

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        user: LoginUserView {
            id: user.id,
            email: user.email.to_string(),
            name: user.full_name(),
            order_history: user.order_history,
            favorites: user.favorites,
        },
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// Full profile view for the `/me` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub order_history: Vec<OrderHistoryEntry>,
    pub favorites: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Response wrapping the caller's profile.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: ProfileView,
}

/// Get the current employee's profile.
///
/// GET /api/auth/me
///
/// # Errors
///
/// Returns 404 when the token's user no longer exists in the store.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state
        .users()
        .find_by_id(claims.id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: ProfileView {
            id: user.id,
            email: user.email.to_string(),
            name: user.full_name(),
            first_name: user.first_name,
            last_name: user.last_name,
            order_history: user.order_history,
            favorites: user.favorites,
            created_at: user.created_at,
        },
    }))
}
