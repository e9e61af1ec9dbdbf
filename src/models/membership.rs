// src/models/membership.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// O papel do usuário dentro de uma garagem.
// A ordem das variantes segue o tipo `garage_role` do banco (ORDER BY role ASC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "garage_role", rename_all = "UPPERCASE")] // Banco
#[serde(rename_all = "UPPERCASE")] // JSON
pub enum GarageRole {
    Owner,
    Admin,
    Editor,
    Viewer,
}

// O vínculo Usuário <-> Garagem
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GarageUser {
    pub garage_id: Uuid,
    pub user_id: Uuid,
    pub role: GarageRole,
    pub created_at: DateTime<Utc>,
}

// Linha da listagem de membros (vínculo + dados do usuário)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarageMember {
    pub user_id: Uuid,
    pub role: GarageRole,
    pub name: String,
    pub email: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGarageUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,

    // Opcional: sem senha, o usuário entra com a senha padrão
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,

    pub role: GarageRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGarageUserPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,

    pub role: Option<GarageRole>,
}

// Query string da listagem de membros
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListMembersQuery {
    // Busca por nome ou e-mail
    pub q: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
