// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadStatus {
    New,
    Contacted,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_source", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadSource {
    Form,
    Whatsapp,
    Manual,
}

// Formulário público da vitrine
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 1, max = 120, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."), length(max = 180))]
    pub email: Option<String>,

    #[validate(length(max = 40))]
    pub phone: Option<String>,

    #[validate(length(max = 500, message = "A mensagem deve ter no máximo 500 caracteres."))]
    pub message: Option<String>,

    pub vehicle_id: Option<Uuid>,

    #[serde(default)]
    pub consent_lgpd: bool,
}

// O que o formulário público recebe de volta
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadCreated {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Referência rasa ao veículo na listagem administrativa
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadVehicleRef {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub version: Option<String>,
    pub year_model: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadListItem {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub vehicle: Option<LeadVehicleRef>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListLeadsQuery {
    // Busca por nome/telefone/e-mail
    pub q: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
