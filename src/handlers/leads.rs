// src/handlers/leads.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AnyMember, RequireRole},
    },
    models::lead::{LeadListItem, ListLeadsQuery},
};

// GET /v1/leads — visão do garagista
#[utoipa::path(
    get,
    path = "/v1/leads",
    tag = "Leads",
    params(ListLeadsQuery),
    responses(
        (status = 200, description = "Lista paginada de leads", body = Page<LeadListItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AnyMember>,
    Query(query): Query<ListLeadsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .lead_service
        .list_for_garage(user.0.garage.id, &query)
        .await?;

    Ok(Json(page))
}
