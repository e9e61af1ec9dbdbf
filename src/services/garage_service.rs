// src/services/garage_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GarageRepository,
    models::garage::{Garage, UpdateGaragePayload},
};

#[derive(Clone)]
pub struct GarageService {
    garage_repo: GarageRepository,
}

impl GarageService {
    pub fn new(garage_repo: GarageRepository) -> Self {
        Self { garage_repo }
    }

    pub async fn get_my_garage(&self, garage_id: Uuid) -> Result<Garage, AppError> {
        self.garage_repo
            .find_by_id(garage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Garagem não encontrada.".to_string()))
    }

    pub async fn update_my_garage(
        &self,
        garage_id: Uuid,
        mut payload: UpdateGaragePayload,
    ) -> Result<Garage, AppError> {
        // CNPJ e WhatsApp são guardados só com dígitos
        if let Some(doc) = &payload.doc {
            payload.doc = Some(digits_only(doc));
        }
        if let Some(phone) = &payload.phone_whatsapp {
            payload.phone_whatsapp = Some(digits_only(phone));
        }

        self.garage_repo
            .update_profile(garage_id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Garagem não encontrada.".to_string()))
    }
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_mascara_de_cnpj_e_telefone() {
        assert_eq!(digits_only("12.345.678/0001-90"), "12345678000190");
        assert_eq!(digits_only("+55 (47) 9 9999-1234"), "5547999991234");
    }
}
