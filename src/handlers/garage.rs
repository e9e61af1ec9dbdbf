// src/handlers/garage.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AnyMember, ContentEditors, RequireRole},
    },
    models::garage::{Garage, UpdateGaragePayload},
};

// GET /v1/garage/me
#[utoipa::path(
    get,
    path = "/v1/garage/me",
    tag = "Garage",
    responses(
        (status = 200, description = "Dados da garagem do usuário autenticado", body = Garage),
        (status = 404, description = "Garagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_garage(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AnyMember>,
) -> Result<Json<Garage>, AppError> {
    let garage = app_state
        .garage_service
        .get_my_garage(user.0.garage.id)
        .await?;

    Ok(Json(garage))
}

// PUT /v1/garage/me
#[utoipa::path(
    put,
    path = "/v1/garage/me",
    tag = "Garage",
    request_body = UpdateGaragePayload,
    responses(
        (status = 200, description = "Garagem atualizada", body = Garage)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_my_garage(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ContentEditors>,
    Json(payload): Json<UpdateGaragePayload>,
) -> Result<Json<Garage>, AppError> {
    payload.validate()?;

    let garage = app_state
        .garage_service
        .update_my_garage(user.0.garage.id, payload)
        .await?;

    Ok(Json(garage))
}
