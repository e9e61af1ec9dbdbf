// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthUser, LoginPayload, LoginResponse},
};

// POST /v1/auth/login
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = LoginResponse),
        (status = 401, description = "Credenciais inválidas ou usuário sem garagem")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// GET /v1/auth/me — devolve os claims do token em vigor
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Claims do usuário autenticado", body = AuthUser)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<AuthUser> {
    Json(user)
}
