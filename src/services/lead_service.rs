// src/services/lead_service.rs

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{clamp, offset, Page},
    },
    db::{GarageRepository, LeadRepository, VehicleRepository},
    models::lead::{
        CreateLeadPayload, LeadCreated, LeadListItem, LeadVehicleRef, ListLeadsQuery,
    },
};

#[derive(Clone)]
pub struct LeadService {
    lead_repo: LeadRepository,
    garage_repo: GarageRepository,
    vehicle_repo: VehicleRepository,
}

impl LeadService {
    pub fn new(
        lead_repo: LeadRepository,
        garage_repo: GarageRepository,
        vehicle_repo: VehicleRepository,
    ) -> Self {
        Self {
            lead_repo,
            garage_repo,
            vehicle_repo,
        }
    }

    // Formulário público da vitrine. A resolução do slug não olha o flag
    // de publicação: uma garagem despublicada ainda recebe leads.
    pub async fn create_public(
        &self,
        garage_slug: &str,
        payload: &CreateLeadPayload,
    ) -> Result<LeadCreated, AppError> {
        let email = normalize(payload.email.as_deref());
        let phone = normalize(payload.phone.as_deref());

        if email.is_none() && phone.is_none() {
            return Err(AppError::BusinessRule(
                "Informe pelo menos e-mail ou telefone.".to_string(),
            ));
        }

        let garage_id = self
            .garage_repo
            .find_id_by_slug(garage_slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Garagem não encontrada.".to_string()))?;

        let vehicle_id = match payload.vehicle_id {
            Some(id) => {
                if !self.vehicle_repo.exists_for_lead(garage_id, id).await? {
                    return Err(AppError::NotFound(
                        "Veículo não encontrado para esta garagem.".to_string(),
                    ));
                }
                Some(id)
            }
            None => None,
        };

        self.lead_repo
            .insert(
                garage_id,
                vehicle_id,
                payload.name.trim(),
                email.as_deref(),
                phone.as_deref(),
                normalize(payload.message.as_deref()).as_deref(),
                payload.consent_lgpd,
            )
            .await
    }

    pub async fn list_for_garage(
        &self,
        garage_id: Uuid,
        query: &ListLeadsQuery,
    ) -> Result<Page<LeadListItem>, AppError> {
        let (page, page_size) = clamp(query.page, query.page_size);
        let (rows, total) = self
            .lead_repo
            .list(
                garage_id,
                query.q.as_deref(),
                page_size,
                offset(page, page_size),
            )
            .await?;

        let items = rows
            .into_iter()
            .map(|row| {
                let vehicle = match (
                    row.vehicle_id,
                    row.vehicle_brand,
                    row.vehicle_model,
                    row.vehicle_year_model,
                ) {
                    (Some(id), Some(brand), Some(model), Some(year_model)) => {
                        Some(LeadVehicleRef {
                            id,
                            brand,
                            model,
                            version: row.vehicle_version,
                            year_model,
                        })
                    }
                    _ => None,
                };

                LeadListItem {
                    id: row.id,
                    name: row.name,
                    email: row.email,
                    phone: row.phone,
                    message: row.message,
                    status: row.status,
                    created_at: row.created_at,
                    vehicle,
                }
            })
            .collect();

        Ok(Page {
            items,
            page,
            page_size,
            total,
        })
    }
}

// Apara espaços e descarta strings vazias
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_apara_e_descarta_vazios() {
        assert_eq!(normalize(Some("  a@b.com ")), Some("a@b.com".to_string()));
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(normalize(None), None);
    }
}
