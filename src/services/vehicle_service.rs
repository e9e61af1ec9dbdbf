// src/services/vehicle_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{clamp, offset, Page},
    },
    db::VehicleRepository,
    models::vehicle::{
        CreateVehiclePayload, NewVehicleImage, UpdateVehiclePayload, Vehicle, VehicleDetail,
        VehicleFilters, VehicleImage, VehicleListItem,
    },
};

#[derive(Clone)]
pub struct VehicleService {
    vehicle_repo: VehicleRepository,
    pool: PgPool,
}

// Regras de negócio de anos e preço, usadas no create e no update (já mesclado)
fn validate_business_rules(
    price_on_request: bool,
    price: Option<Decimal>,
    year_fabrication: i32,
    year_model: i32,
) -> Result<(), AppError> {
    if year_model < year_fabrication {
        return Err(AppError::BusinessRule(
            "O ano do modelo deve ser maior ou igual ao ano de fabricação.".to_string(),
        ));
    }
    if !price_on_request && price.is_none() {
        return Err(AppError::BusinessRule(
            "O preço é obrigatório quando o veículo não é 'preço sob consulta'.".to_string(),
        ));
    }
    Ok(())
}

// Mescla o payload parcial sobre o estado atual. Campos ausentes ficam
// como estão; não é possível "limpar" um campo opcional por aqui.
fn apply_partial(mut vehicle: Vehicle, payload: &UpdateVehiclePayload) -> Vehicle {
    if let Some(brand) = &payload.brand {
        vehicle.brand = brand.clone();
    }
    if let Some(model) = &payload.model {
        vehicle.model = model.clone();
    }
    if payload.version.is_some() {
        vehicle.version = payload.version.clone();
    }
    if let Some(year) = payload.year_fabrication {
        vehicle.year_fabrication = year;
    }
    if let Some(year) = payload.year_model {
        vehicle.year_model = year;
    }
    if let Some(fuel) = payload.fuel {
        vehicle.fuel = fuel;
    }
    if let Some(gearbox) = payload.gearbox {
        vehicle.gearbox = gearbox;
    }
    if payload.color.is_some() {
        vehicle.color = payload.color.clone();
    }
    if let Some(por) = payload.price_on_request {
        vehicle.price_on_request = por;
    }
    if payload.price.is_some() {
        vehicle.price = payload.price;
    }
    if let Some(status) = payload.status {
        vehicle.status = status;
    }
    if payload.description.is_some() {
        vehicle.description = payload.description.clone();
    }
    if payload.renavam.is_some() {
        vehicle.renavam = payload.renavam.clone();
    }
    vehicle
}

impl VehicleService {
    pub fn new(vehicle_repo: VehicleRepository, pool: PgPool) -> Self {
        Self { vehicle_repo, pool }
    }

    pub async fn create(
        &self,
        garage_id: Uuid,
        actor_id: Uuid,
        payload: &CreateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        validate_business_rules(
            payload.price_on_request,
            payload.price,
            payload.year_fabrication,
            payload.year_model,
        )?;

        // Unicidade (garagem, renavam), só quando informado
        if let Some(renavam) = &payload.renavam {
            if self
                .vehicle_repo
                .renavam_exists(garage_id, renavam, None)
                .await?
            {
                return Err(AppError::Conflict(
                    "Renavam já cadastrado para esta garagem.".to_string(),
                ));
            }
        }

        self.vehicle_repo.insert(garage_id, actor_id, payload).await
    }

    pub async fn update(
        &self,
        garage_id: Uuid,
        actor_id: Uuid,
        vehicle_id: Uuid,
        payload: &UpdateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        let existing = self.ensure_vehicle(garage_id, vehicle_id).await?;

        // Revalida sobre o estado mesclado: um update parcial nunca pode
        // deixar anos ou preço inconsistentes.
        let merged = apply_partial(existing, payload);
        validate_business_rules(
            merged.price_on_request,
            merged.price,
            merged.year_fabrication,
            merged.year_model,
        )?;

        if let Some(renavam) = &payload.renavam {
            if self
                .vehicle_repo
                .renavam_exists(garage_id, renavam, Some(vehicle_id))
                .await?
            {
                return Err(AppError::Conflict(
                    "Renavam já cadastrado para esta garagem.".to_string(),
                ));
            }
        }

        self.vehicle_repo.update(&merged, actor_id).await
    }

    // Soft delete: o histórico fica no banco, com status SOLD
    pub async fn remove(&self, garage_id: Uuid, vehicle_id: Uuid) -> Result<(), AppError> {
        let affected = self.vehicle_repo.soft_delete(garage_id, vehicle_id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Veículo não encontrado.".to_string()));
        }
        Ok(())
    }

    pub async fn get(&self, garage_id: Uuid, vehicle_id: Uuid) -> Result<VehicleDetail, AppError> {
        let vehicle = self.ensure_vehicle(garage_id, vehicle_id).await?;
        let images = self.vehicle_repo.list_images(garage_id, vehicle_id).await?;
        Ok(VehicleDetail { vehicle, images })
    }

    pub async fn list_admin(
        &self,
        garage_id: Uuid,
        filters: &VehicleFilters,
    ) -> Result<Page<VehicleListItem>, AppError> {
        let (page, page_size) = clamp(filters.page, filters.page_size);
        let (items, total) = self
            .vehicle_repo
            .list_admin(garage_id, filters, page_size, offset(page, page_size))
            .await?;

        Ok(Page {
            items,
            page,
            page_size,
            total,
        })
    }

    // ---
    // Galeria
    // ---

    // Anexa imagens mantendo a invariante: veículo com imagens tem
    // exatamente uma capa. Limpeza de capas + inserções são atômicas.
    pub async fn attach_images(
        &self,
        garage_id: Uuid,
        vehicle_id: Uuid,
        items: &[NewVehicleImage],
    ) -> Result<Vec<VehicleImage>, AppError> {
        self.ensure_vehicle(garage_id, vehicle_id).await?;

        let has_incoming_cover = items.iter().any(|i| i.is_cover);

        let mut tx = self.pool.begin().await?;

        let mut position = self.vehicle_repo.max_position(&mut *tx, vehicle_id).await?;

        if has_incoming_cover {
            self.vehicle_repo.clear_covers(&mut *tx, vehicle_id).await?;
        }

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            position += 1;
            let image = self
                .vehicle_repo
                .insert_image(&mut *tx, vehicle_id, &item.path, item.is_cover, position)
                .await?;
            created.push(image);
        }

        // Sem capa nova e sem capa antiga: promove a primeira anexada
        if !has_incoming_cover && !created.is_empty() {
            let already_has_cover = self.vehicle_repo.has_cover(&mut *tx, vehicle_id).await?;
            if !already_has_cover {
                self.vehicle_repo
                    .set_cover_flag(&mut *tx, created[0].id)
                    .await?;
                created[0].is_cover = true;
            }
        }

        tx.commit().await?;

        Ok(created)
    }

    pub async fn set_cover(
        &self,
        garage_id: Uuid,
        vehicle_id: Uuid,
        image_id: Uuid,
    ) -> Result<(), AppError> {
        self.ensure_vehicle(garage_id, vehicle_id).await?;

        self.vehicle_repo
            .find_image(vehicle_id, image_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Imagem não encontrada.".to_string()))?;

        // Limpar e marcar são uma única unidade: nunca zero ou duas capas
        let mut tx = self.pool.begin().await?;
        self.vehicle_repo.clear_covers(&mut *tx, vehicle_id).await?;
        self.vehicle_repo.set_cover_flag(&mut *tx, image_id).await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn remove_image(
        &self,
        garage_id: Uuid,
        vehicle_id: Uuid,
        image_id: Uuid,
    ) -> Result<(), AppError> {
        self.ensure_vehicle(garage_id, vehicle_id).await?;

        let affected = self.vehicle_repo.delete_image(vehicle_id, image_id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Imagem não encontrada.".to_string()));
        }
        Ok(())
    }

    pub async fn list_images(
        &self,
        garage_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Vec<VehicleImage>, AppError> {
        self.ensure_vehicle(garage_id, vehicle_id).await?;
        self.vehicle_repo.list_images(garage_id, vehicle_id).await
    }

    async fn ensure_vehicle(&self, garage_id: Uuid, vehicle_id: Uuid) -> Result<Vehicle, AppError> {
        self.vehicle_repo
            .find_by_id(garage_id, vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{Fuel, Gearbox, VehicleStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn vehicle_base() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            garage_id: Uuid::new_v4(),
            brand: "Chevrolet".to_string(),
            model: "Onix".to_string(),
            version: None,
            year_fabrication: 2019,
            year_model: 2020,
            fuel: Fuel::Flex,
            gearbox: Gearbox::Manual,
            color: None,
            price_on_request: false,
            price: Some(Decimal::new(55_000_00, 2)),
            status: VehicleStatus::InStock,
            description: None,
            renavam: None,
            deleted_at: None,
            created_by: Uuid::new_v4(),
            updated_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rejeita_ano_modelo_menor_que_fabricacao() {
        let result = validate_business_rules(false, Some(Decimal::new(50_000, 0)), 2021, 2020);
        assert!(matches!(result, Err(AppError::BusinessRule(_))));
    }

    #[test]
    fn aceita_anos_iguais() {
        assert!(validate_business_rules(false, Some(Decimal::new(50_000, 0)), 2020, 2020).is_ok());
    }

    #[test]
    fn exige_preco_quando_nao_e_sob_consulta() {
        let result = validate_business_rules(false, None, 2019, 2020);
        assert!(matches!(result, Err(AppError::BusinessRule(_))));
    }

    #[test]
    fn dispensa_preco_quando_sob_consulta() {
        assert!(validate_business_rules(true, None, 2019, 2020).is_ok());
    }

    #[test]
    fn update_parcial_nao_pode_quebrar_a_regra_dos_anos() {
        // Veículo 2019/2020; baixar só o ano do modelo para 2018 deve falhar
        let merged = apply_partial(
            vehicle_base(),
            &UpdateVehiclePayload {
                year_model: Some(2018),
                ..Default::default()
            },
        );
        let result = validate_business_rules(
            merged.price_on_request,
            merged.price,
            merged.year_fabrication,
            merged.year_model,
        );
        assert!(matches!(result, Err(AppError::BusinessRule(_))));
    }

    #[test]
    fn update_parcial_preserva_campos_ausentes() {
        let merged = apply_partial(
            vehicle_base(),
            &UpdateVehiclePayload {
                brand: Some("Fiat".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(merged.brand, "Fiat");
        assert_eq!(merged.model, "Onix");
        assert_eq!(merged.price, Some(Decimal::new(55_000_00, 2)));
    }

    #[test]
    fn sob_consulta_mantem_preco_guardado() {
        // Ligar priceOnRequest não apaga o preço do banco; quem esconde é a vitrine
        let merged = apply_partial(
            vehicle_base(),
            &UpdateVehiclePayload {
                price_on_request: Some(true),
                ..Default::default()
            },
        );
        assert!(merged.price_on_request);
        assert!(merged.price.is_some());
    }
}
