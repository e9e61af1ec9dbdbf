// src/handlers/garage_users.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AnyMember, RequireRole, UserManagers},
    },
    models::membership::{
        CreateGarageUserPayload, GarageMember, ListMembersQuery, UpdateGarageUserPayload,
    },
};

// GET /v1/garage/users
#[utoipa::path(
    get,
    path = "/v1/garage/users",
    tag = "Garage Users",
    params(ListMembersQuery),
    responses(
        (status = 200, description = "Lista paginada de membros", body = Page<GarageMember>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AnyMember>,
    Query(query): Query<ListMembersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .membership_service
        .list(user.0.garage.id, &query)
        .await?;

    Ok(Json(page))
}

// POST /v1/garage/users
#[utoipa::path(
    post,
    path = "/v1/garage/users",
    tag = "Garage Users",
    request_body = CreateGarageUserPayload,
    responses(
        (status = 201, description = "Usuário vinculado à garagem"),
        (status = 409, description = "Usuário já vinculado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<UserManagers>,
    Json(payload): Json<CreateGarageUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user_id = app_state
        .membership_service
        .create(user.0.garage.id, user.0.sub, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "userId": user_id }))))
}

// PUT /v1/garage/users/{user_id}
#[utoipa::path(
    put,
    path = "/v1/garage/users/{user_id}",
    tag = "Garage Users",
    request_body = UpdateGarageUserPayload,
    params(("user_id" = Uuid, Path, description = "ID do usuário alvo")),
    responses(
        (status = 200, description = "Dados/role atualizados"),
        (status = 403, description = "Operação deixaria a garagem sem OWNER"),
        (status = 404, description = "Usuário não vinculado à garagem")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<UserManagers>,
    Path(target_user_id): Path<Uuid>,
    Json(payload): Json<UpdateGarageUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .membership_service
        .update(user.0.garage.id, user.0.sub, target_user_id, &payload)
        .await?;

    Ok(Json(json!({ "ok": true })))
}

// DELETE /v1/garage/users/{user_id}
#[utoipa::path(
    delete,
    path = "/v1/garage/users/{user_id}",
    tag = "Garage Users",
    params(("user_id" = Uuid, Path, description = "ID do usuário alvo")),
    responses(
        (status = 200, description = "Vínculo removido"),
        (status = 403, description = "Operação deixaria a garagem sem OWNER"),
        (status = 404, description = "Usuário não vinculado à garagem")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<UserManagers>,
    Path(target_user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .membership_service
        .remove(user.0.garage.id, user.0.sub, target_user_id)
        .await?;

    Ok(Json(json!({ "ok": true })))
}
