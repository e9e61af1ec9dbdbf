// src/models/garage.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ---
// A Garagem (o "Tenant")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Garage {
    pub id: Uuid,
    pub name: String,
    // Chave pública da URL da vitrine
    pub slug: String,
    pub doc: Option<String>,
    pub phone_whatsapp: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub theme_primary_color: Option<String>,
    pub is_publish_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção pública da garagem (vitrine)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GaragePublic {
    pub name: String,
    pub slug: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone_whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub website: Option<String>,
    pub theme_primary_color: Option<String>,
}

fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let ok = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !ok {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("A cor deve estar no formato #RRGGBB.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGaragePayload {
    #[validate(length(min = 1, max = 120, message = "O nome deve ter entre 1 e 120 caracteres."))]
    pub name: Option<String>,

    // CNPJ, com ou sem máscara (limpamos no service)
    #[validate(length(max = 18, message = "O documento deve ter no máximo 18 caracteres."))]
    pub doc: Option<String>,

    #[validate(length(max = 20, message = "O telefone deve ter no máximo 20 caracteres."))]
    pub phone_whatsapp: Option<String>,

    #[validate(length(max = 120))]
    pub address_line: Option<String>,

    #[validate(length(max = 60))]
    pub city: Option<String>,

    #[validate(length(max = 2, message = "Use a sigla da UF (2 letras)."))]
    pub state: Option<String>,

    #[validate(length(max = 12))]
    pub zip: Option<String>,

    #[validate(length(max = 120))]
    pub website: Option<String>,

    #[validate(length(max = 120))]
    pub instagram: Option<String>,

    #[validate(length(max = 120))]
    pub facebook: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub theme_primary_color: Option<String>,

    pub is_publish_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_cor_hex_valida() {
        assert!(validate_hex_color("#1A2b3C").is_ok());
    }

    #[test]
    fn rejeita_cor_fora_do_formato() {
        assert!(validate_hex_color("1A2B3C").is_err());
        assert!(validate_hex_color("#1A2B3").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }
}
