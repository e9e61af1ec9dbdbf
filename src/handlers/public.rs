// src/handlers/public.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    models::{
        garage::GaragePublic,
        lead::{CreateLeadPayload, LeadCreated},
        vehicle::{PublicVehicleCard, PublicVehicleDetail, VehicleFilters},
    },
};

// GET /v1/public/{garage_slug}/garage
#[utoipa::path(
    get,
    path = "/v1/public/{garage_slug}/garage",
    tag = "Public",
    params(("garage_slug" = String, Path, description = "Slug público da garagem")),
    responses(
        (status = 200, description = "Dados públicos da garagem", body = GaragePublic),
        (status = 404, description = "Garagem inexistente ou não publicada")
    )
)]
pub async fn get_garage(
    State(app_state): State<AppState>,
    Path(garage_slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let garage = app_state.public_service.get_garage(&garage_slug).await?;
    Ok(Json(garage))
}

// GET /v1/public/{garage_slug}/vehicles
#[utoipa::path(
    get,
    path = "/v1/public/{garage_slug}/vehicles",
    tag = "Public",
    params(
        ("garage_slug" = String, Path, description = "Slug público da garagem"),
        VehicleFilters
    ),
    responses(
        (status = 200, description = "Vitrine paginada (só IN_STOCK)", body = Page<PublicVehicleCard>)
    )
)]
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    Path(garage_slug): Path<String>,
    Query(filters): Query<VehicleFilters>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .public_service
        .list_vehicles(&garage_slug, &filters)
        .await?;

    Ok(Json(page))
}

// GET /v1/public/{garage_slug}/vehicles/{id}
#[utoipa::path(
    get,
    path = "/v1/public/{garage_slug}/vehicles/{id}",
    tag = "Public",
    params(
        ("garage_slug" = String, Path, description = "Slug público da garagem"),
        ("id" = Uuid, Path, description = "ID do veículo")
    ),
    responses(
        (status = 200, description = "Detalhe do veículo com galeria", body = PublicVehicleDetail),
        (status = 404, description = "Veículo indisponível na vitrine")
    )
)]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path((garage_slug, id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state
        .public_service
        .get_vehicle(&garage_slug, id)
        .await?;

    Ok(Json(detail))
}

// POST /v1/public/{garage_slug}/leads — formulário da vitrine
#[utoipa::path(
    post,
    path = "/v1/public/{garage_slug}/leads",
    tag = "Public",
    request_body = CreateLeadPayload,
    params(("garage_slug" = String, Path, description = "Slug público da garagem")),
    responses(
        (status = 201, description = "Interesse registrado", body = LeadCreated),
        (status = 400, description = "Nem e-mail nem telefone informados"),
        (status = 404, description = "Garagem ou veículo inexistente")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    Path(garage_slug): Path<String>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state
        .lead_service
        .create_public(&garage_slug, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(lead)))
}
