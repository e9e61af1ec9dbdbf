// src/handlers/vehicles.rs

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        pagination::Page,
        upload::{generate_file_name, is_allowed_image, MAX_FILES_PER_REQUEST, MAX_IMAGE_BYTES},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AnyMember, ContentEditors, RequireRole, UserManagers},
    },
    models::vehicle::{
        CreateVehiclePayload, NewVehicleImage, UpdateVehiclePayload, Vehicle, VehicleDetail,
        VehicleFilters, VehicleImage, VehicleListItem,
    },
};

// GET /v1/vehicles/admin
#[utoipa::path(
    get,
    path = "/v1/vehicles/admin",
    tag = "Vehicles",
    params(VehicleFilters),
    responses(
        (status = 200, description = "Lista paginada de veículos", body = Page<VehicleListItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_admin(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ContentEditors>,
    Query(filters): Query<VehicleFilters>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .vehicle_service
        .list_admin(user.0.garage.id, &filters)
        .await?;

    Ok(Json(page))
}

// GET /v1/vehicles/{id}
#[utoipa::path(
    get,
    path = "/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo com galeria", body = VehicleDetail),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AnyMember>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.vehicle_service.get(user.0.garage.id, id).await?;
    Ok(Json(detail))
}

// POST /v1/vehicles
#[utoipa::path(
    post,
    path = "/v1/vehicles",
    tag = "Vehicles",
    request_body = CreateVehiclePayload,
    responses(
        (status = 201, description = "Veículo criado", body = Vehicle),
        (status = 400, description = "Regra de negócio violada (anos/preço)"),
        (status = 409, description = "Renavam duplicado na garagem")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ContentEditors>,
    Json(payload): Json<CreateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vehicle = app_state
        .vehicle_service
        .create(user.0.garage.id, user.0.sub, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

// PUT /v1/vehicles/{id}
#[utoipa::path(
    put,
    path = "/v1/vehicles/{id}",
    tag = "Vehicles",
    request_body = UpdateVehiclePayload,
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo atualizado", body = Vehicle),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ContentEditors>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let vehicle = app_state
        .vehicle_service
        .update(user.0.garage.id, user.0.sub, id, &payload)
        .await?;

    Ok(Json(vehicle))
}

// DELETE /v1/vehicles/{id} — soft delete
#[utoipa::path(
    delete,
    path = "/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo removido (soft delete)"),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<UserManagers>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.vehicle_service.remove(user.0.garage.id, id).await?;
    Ok(Json(json!({ "ok": true })))
}

// ---
// Galeria de imagens
// ---

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UploadImagesQuery {
    // Índice (0-based) do arquivo que vira capa
    pub cover_index: Option<usize>,
}

// POST /v1/vehicles/{id}/images — multipart, campo "files"
#[utoipa::path(
    post,
    path = "/v1/vehicles/{id}/images",
    tag = "Vehicles",
    params(
        ("id" = Uuid, Path, description = "ID do veículo"),
        UploadImagesQuery
    ),
    responses(
        (status = 201, description = "Imagens anexadas", body = Vec<VehicleImage>),
        (status = 400, description = "Arquivo inválido (tipo ou tamanho)")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_images(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ContentEditors>,
    Path(id): Path<Uuid>,
    Query(query): Query<UploadImagesQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut items: Vec<NewVehicleImage> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BusinessRule(format!("Multipart inválido: {}", e)))?
    {
        if field.name() != Some("files") {
            continue;
        }

        if items.len() >= MAX_FILES_PER_REQUEST {
            return Err(AppError::BusinessRule(format!(
                "No máximo {} arquivos por requisição.",
                MAX_FILES_PER_REQUEST
            )));
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_allowed_image(&content_type) {
            return Err(AppError::BusinessRule(
                "Arquivo inválido (somente imagens jpeg/png/webp/gif).".to_string(),
            ));
        }

        let original_name = field.file_name().unwrap_or("imagem.jpg").to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BusinessRule(format!("Falha ao ler arquivo: {}", e)))?;

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BusinessRule(
                "Arquivo acima do limite de 5MB.".to_string(),
            ));
        }

        let file_name = generate_file_name(&original_name);
        let disk_path = std::path::Path::new(&app_state.upload_dir).join(&file_name);

        tokio::fs::create_dir_all(&app_state.upload_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao criar diretório de uploads: {}", e))?;
        tokio::fs::write(&disk_path, &bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao gravar arquivo: {}", e))?;

        let index = items.len();
        items.push(NewVehicleImage {
            path: format!("/uploads/{}", file_name),
            is_cover: query.cover_index == Some(index),
        });
    }

    if items.is_empty() {
        return Err(AppError::BusinessRule(
            "Nenhum arquivo de imagem enviado.".to_string(),
        ));
    }

    let created = app_state
        .vehicle_service
        .attach_images(user.0.garage.id, id, &items)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /v1/vehicles/{id}/images
#[utoipa::path(
    get,
    path = "/v1/vehicles/{id}/images",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Galeria ordenada por posição", body = Vec<VehicleImage>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_images(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AnyMember>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let images = app_state
        .vehicle_service
        .list_images(user.0.garage.id, id)
        .await?;

    Ok(Json(images))
}

// PATCH /v1/vehicles/{id}/images/{image_id}/cover
#[utoipa::path(
    patch,
    path = "/v1/vehicles/{id}/images/{image_id}/cover",
    tag = "Vehicles",
    params(
        ("id" = Uuid, Path, description = "ID do veículo"),
        ("image_id" = Uuid, Path, description = "ID da imagem")
    ),
    responses(
        (status = 200, description = "Imagem definida como capa"),
        (status = 404, description = "Imagem não pertence ao veículo")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_cover(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<ContentEditors>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .vehicle_service
        .set_cover(user.0.garage.id, id, image_id)
        .await?;

    Ok(Json(json!({ "ok": true })))
}

// DELETE /v1/vehicles/{id}/images/{image_id}
#[utoipa::path(
    delete,
    path = "/v1/vehicles/{id}/images/{image_id}",
    tag = "Vehicles",
    params(
        ("id" = Uuid, Path, description = "ID do veículo"),
        ("image_id" = Uuid, Path, description = "ID da imagem")
    ),
    responses(
        (status = 200, description = "Imagem removida"),
        (status = 404, description = "Imagem não pertence ao veículo")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_image(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<UserManagers>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .vehicle_service
        .remove_image(user.0.garage.id, id, image_id)
        .await?;

    Ok(Json(json!({ "ok": true })))
}
