// src/services/public_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{clamp, offset, Page},
    },
    db::{GarageRepository, VehicleRepository},
    models::{
        garage::GaragePublic,
        vehicle::{
            PublicGarageContact, PublicImage, PublicVehicleCard, PublicVehicleDetail,
            VehicleFilters,
        },
    },
};

#[derive(Clone)]
pub struct PublicService {
    garage_repo: GarageRepository,
    vehicle_repo: VehicleRepository,
}

// Mascaramento de preço: veículo "sob consulta" nunca expõe o valor
// guardado, não importa o que esteja no banco.
fn mask_price(price_on_request: bool, price: Option<Decimal>) -> Option<Decimal> {
    if price_on_request {
        None
    } else {
        price
    }
}

impl PublicService {
    pub fn new(garage_repo: GarageRepository, vehicle_repo: VehicleRepository) -> Self {
        Self {
            garage_repo,
            vehicle_repo,
        }
    }

    // Slug inexistente e garagem despublicada respondem o mesmo 404:
    // a existência de um tenant não publicado não vaza.
    pub async fn get_garage(&self, slug: &str) -> Result<GaragePublic, AppError> {
        self.garage_repo
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Garagem não publicada.".to_string()))
    }

    pub async fn list_vehicles(
        &self,
        slug: &str,
        filters: &VehicleFilters,
    ) -> Result<Page<PublicVehicleCard>, AppError> {
        let (page, page_size) = clamp(filters.page, filters.page_size);
        let (rows, total) = self
            .vehicle_repo
            .list_public(slug, filters, page_size, offset(page, page_size))
            .await?;

        let items = rows
            .into_iter()
            .map(|mut card| {
                card.price = mask_price(card.price_on_request, card.price);
                card
            })
            .collect();

        Ok(Page {
            items,
            page,
            page_size,
            total,
        })
    }

    pub async fn get_vehicle(&self, slug: &str, id: Uuid) -> Result<PublicVehicleDetail, AppError> {
        let vehicle = self
            .vehicle_repo
            .find_public_vehicle(slug, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado.".to_string()))?;

        let images = self
            .vehicle_repo
            .list_images_cover_first(vehicle.id)
            .await?
            .into_iter()
            .map(|img| PublicImage {
                url: img.url,
                is_cover: img.is_cover,
            })
            .collect();

        let garage = self
            .garage_repo
            .find_by_id(vehicle.garage_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Garagem {} sumiu do banco", vehicle.garage_id))?;

        Ok(PublicVehicleDetail {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            version: vehicle.version,
            year_fabrication: vehicle.year_fabrication,
            year_model: vehicle.year_model,
            fuel: vehicle.fuel,
            gearbox: vehicle.gearbox,
            color: vehicle.color,
            description: vehicle.description,
            price_on_request: vehicle.price_on_request,
            price: mask_price(vehicle.price_on_request, vehicle.price),
            images,
            garage: PublicGarageContact {
                name: garage.name,
                slug: garage.slug,
                phone_whatsapp: garage.phone_whatsapp,
                instagram: garage.instagram,
                website: garage.website,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sob_consulta_nunca_expoe_preco() {
        let price = Some(Decimal::new(89_900_00, 2));
        assert_eq!(mask_price(true, price), None);
        assert_eq!(mask_price(true, None), None);
    }

    #[test]
    fn preco_normal_passa_intacto() {
        let price = Some(Decimal::new(89_900_00, 2));
        assert_eq!(mask_price(false, price), price);
    }
}
