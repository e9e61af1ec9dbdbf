// src/models/vehicle.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "fuel_type", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum Fuel {
    Gasoline,
    Alcohol,
    Flex,
    Diesel,
    Hybrid,
    Electric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gearbox_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gearbox {
    Manual,
    Automatic,
    Cvt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "vehicle_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    InStock,
    Reserved,
    Sold,
}

// O veículo como está no banco
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub garage_id: Uuid,
    pub brand: String,
    pub model: String,
    pub version: Option<String>,
    pub year_fabrication: i32,
    pub year_model: i32,
    pub fuel: Fuel,
    pub gearbox: Gearbox,
    pub color: Option<String>,
    pub price_on_request: bool,
    pub price: Option<Decimal>,
    pub status: VehicleStatus,
    pub description: Option<String>,
    pub renavam: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleImage {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub url: String,
    pub is_cover: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

// Veículo + galeria (detalhe administrativo)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetail {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub images: Vec<VehicleImage>,
}

// Linha da listagem administrativa
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListItem {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year_model: i32,
    pub year_fabrication: i32,
    pub status: VehicleStatus,
    pub price: Option<Decimal>,
    pub price_on_request: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehiclePayload {
    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub brand: String,

    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub model: String,

    pub version: Option<String>,

    #[validate(range(min = 1900, max = 2100, message = "Ano de fabricação inválido."))]
    pub year_fabrication: i32,

    #[validate(range(min = 1900, max = 2100, message = "Ano do modelo inválido."))]
    pub year_model: i32,

    pub fuel: Fuel,
    pub gearbox: Gearbox,
    pub color: Option<String>,

    #[serde(default)]
    pub price_on_request: bool,
    pub price: Option<Decimal>,

    pub status: VehicleStatus,
    pub description: Option<String>,
    pub renavam: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehiclePayload {
    #[validate(length(min = 1, message = "A marca é obrigatória."))]
    pub brand: Option<String>,

    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub model: Option<String>,

    pub version: Option<String>,

    #[validate(range(min = 1900, max = 2100, message = "Ano de fabricação inválido."))]
    pub year_fabrication: Option<i32>,

    #[validate(range(min = 1900, max = 2100, message = "Ano do modelo inválido."))]
    pub year_model: Option<i32>,

    pub fuel: Option<Fuel>,
    pub gearbox: Option<Gearbox>,
    pub color: Option<String>,

    pub price_on_request: Option<bool>,
    pub price: Option<Decimal>,

    pub status: Option<VehicleStatus>,
    pub description: Option<String>,
    pub renavam: Option<String>,
}

// Query string das listagens (admin e pública)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehicleFilters {
    // Busca em marca/modelo/versão
    pub q: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub status: Option<VehicleStatus>,
    pub year: Option<i32>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// Imagem recém-recebida pelo upload, ainda sem linha no banco
#[derive(Debug, Clone)]
pub struct NewVehicleImage {
    pub path: String,
    pub is_cover: bool,
}

// ---
// Projeções públicas (vitrine). O preço já sai mascarado quando
// priceOnRequest = true.
// ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicVehicleCard {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub version: Option<String>,
    pub year_fabrication: i32,
    pub year_model: i32,
    pub fuel: Fuel,
    pub gearbox: Gearbox,
    pub price_on_request: bool,
    pub price: Option<Decimal>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicImage {
    pub url: String,
    pub is_cover: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicGarageContact {
    pub name: String,
    pub slug: String,
    pub phone_whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicVehicleDetail {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub version: Option<String>,
    pub year_fabrication: i32,
    pub year_model: i32,
    pub fuel: Fuel,
    pub gearbox: Gearbox,
    pub color: Option<String>,
    pub description: Option<String>,
    pub price_on_request: bool,
    pub price: Option<Decimal>,
    pub images: Vec<PublicImage>,
    pub garage: PublicGarageContact,
}
