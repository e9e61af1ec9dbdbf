// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::membership::GarageRole;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub name: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Garagem ativa embutida no token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GarageClaim {
    pub id: Uuid,
    pub role: GarageRole,
}

// Estrutura de dados ("claims") dentro do JWT.
// Depois do login, o papel vale verbatim até o token expirar —
// uma troca de role só passa a valer no próximo login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    pub sub: Uuid, // ID do usuário
    pub email: String,
    pub garage: GarageClaim,
    pub iat: usize, // Issued At
    pub exp: usize, // Expiration time
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGarage {
    pub id: Uuid,
    pub slug: String,
    pub role: GarageRole,
}

// Resposta de autenticação com o token e a garagem ativa
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserSummary,
    pub active_garage: ActiveGarage,
}
