//! services/api/src/web/auth.rs
//!
//! Authentication endpoints. Authentication is a stub by design: any
//! credentials are accepted and a fresh session token is minted, with no
//! validation and no middleware behind it.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub session_token: Uuid,
    pub email: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Log in with any credentials.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse)
    )
)]
pub async fn login_handler(Json(req): Json<LoginRequest>) -> impl IntoResponse {
    let response = AuthResponse {
        session_token: Uuid::new_v4(),
        email: req.email,
    };
    (StatusCode::OK, Json(response))
}

/// Create an account with any credentials.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse)
    )
)]
pub async fn signup_handler(Json(req): Json<SignupRequest>) -> impl IntoResponse {
    let response = AuthResponse {
        session_token: Uuid::new_v4(),
        email: req.email,
    };
    (StatusCode::CREATED, Json(response))
}
