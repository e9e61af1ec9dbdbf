// src/db/vehicle_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::vehicle::{
        CreateVehiclePayload, PublicVehicleCard, Vehicle, VehicleFilters, VehicleImage,
        VehicleListItem,
    },
};

#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

const VEHICLE_COLUMNS: &str = "id, garage_id, brand, model, version, year_fabrication, \
     year_model, fuel, gearbox, color, price_on_request, price, status, description, \
     renavam, deleted_at, created_by, updated_by, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, vehicle_id, url, is_cover, position, created_at";

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        garage_id: Uuid,
        actor_id: Uuid,
        payload: &CreateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (
                garage_id, brand, model, version, year_fabrication, year_model,
                fuel, gearbox, color, price_on_request, price, status, description,
                renavam, created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(garage_id)
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(payload.version.as_deref())
        .bind(payload.year_fabrication)
        .bind(payload.year_model)
        .bind(payload.fuel)
        .bind(payload.gearbox)
        .bind(payload.color.as_deref())
        .bind(payload.price_on_request)
        .bind(payload.price)
        .bind(payload.status)
        .bind(payload.description.as_deref())
        .bind(payload.renavam.as_deref())
        .bind(actor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_renavam_conflict)?;

        Ok(vehicle)
    }

    // Busca sempre limitada ao tenant. Inclui soft-deletados: quem decide
    // o que fazer com eles é o service.
    pub async fn find_by_id(
        &self,
        garage_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1 AND garage_id = $2"
        ))
        .bind(id)
        .bind(garage_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    // Grava o estado já mesclado (existente + parcial) calculado pelo service
    pub async fn update(&self, vehicle: &Vehicle, actor_id: Uuid) -> Result<Vehicle, AppError> {
        let updated = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, version = $4, year_fabrication = $5,
                year_model = $6, fuel = $7, gearbox = $8, color = $9,
                price_on_request = $10, price = $11, status = $12,
                description = $13, renavam = $14, updated_by = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(vehicle.id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.version.as_deref())
        .bind(vehicle.year_fabrication)
        .bind(vehicle.year_model)
        .bind(vehicle.fuel)
        .bind(vehicle.gearbox)
        .bind(vehicle.color.as_deref())
        .bind(vehicle.price_on_request)
        .bind(vehicle.price)
        .bind(vehicle.status)
        .bind(vehicle.description.as_deref())
        .bind(vehicle.renavam.as_deref())
        .bind(actor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_renavam_conflict)?;

        Ok(updated)
    }

    // Soft delete: marca deleted_at e força o status para SOLD
    pub async fn soft_delete(&self, garage_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE vehicles SET deleted_at = NOW(), status = 'SOLD' \
             WHERE id = $1 AND garage_id = $2",
        )
        .bind(id)
        .bind(garage_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn renavam_exists(
        &self,
        garage_id: Uuid,
        renavam: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM vehicles \
             WHERE garage_id = $1 AND renavam = $2 AND ($3::uuid IS NULL OR id <> $3))",
        )
        .bind(garage_id)
        .bind(renavam)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn list_admin(
        &self,
        garage_id: Uuid,
        filters: &VehicleFilters,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<VehicleListItem>, i64), AppError> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM vehicles");
        Self::push_admin_filters(&mut count_qb, garage_id, filters);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut items_qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, brand, model, year_model, year_fabrication, status, price, \
             price_on_request, created_at FROM vehicles",
        );
        Self::push_admin_filters(&mut items_qb, garage_id, filters);
        items_qb.push(" ORDER BY created_at DESC");
        items_qb.push(" LIMIT ").push_bind(page_size);
        items_qb.push(" OFFSET ").push_bind(offset);

        let items = items_qb
            .build_query_as::<VehicleListItem>()
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    fn push_admin_filters(
        qb: &mut QueryBuilder<'_, Postgres>,
        garage_id: Uuid,
        filters: &VehicleFilters,
    ) {
        qb.push(" WHERE garage_id = ").push_bind(garage_id);
        qb.push(" AND deleted_at IS NULL");

        if let Some(status) = filters.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(brand) = &filters.brand {
            qb.push(" AND brand ILIKE ").push_bind(format!("%{}%", brand));
        }
        if let Some(model) = &filters.model {
            qb.push(" AND model ILIKE ").push_bind(format!("%{}%", model));
        }
        if let Some(q) = &filters.q {
            let pattern = format!("%{}%", q);
            qb.push(" AND (brand ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR model ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR version ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(year) = filters.year {
            qb.push(" AND year_model = ").push_bind(year);
        }
        if let Some(min) = filters.min_price {
            qb.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = filters.max_price {
            qb.push(" AND price <= ").push_bind(max);
        }
    }

    // ---
    // Vitrine pública: só IN_STOCK, não deletado e garagem publicada
    // ---

    pub async fn list_public(
        &self,
        slug: &str,
        filters: &VehicleFilters,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<PublicVehicleCard>, i64), AppError> {
        let mut count_qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT COUNT(*) FROM vehicles v JOIN garages g ON g.id = v.garage_id",
        );
        Self::push_public_filters(&mut count_qb, slug, filters);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut items_qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT v.id, v.brand, v.model, v.version, v.year_fabrication, v.year_model, \
             v.fuel, v.gearbox, v.price_on_request, v.price, \
             (SELECT vi.url FROM vehicle_images vi \
              WHERE vi.vehicle_id = v.id AND vi.is_cover \
              ORDER BY vi.position ASC LIMIT 1) AS cover_url \
             FROM vehicles v JOIN garages g ON g.id = v.garage_id",
        );
        Self::push_public_filters(&mut items_qb, slug, filters);
        items_qb.push(" ORDER BY v.created_at DESC");
        items_qb.push(" LIMIT ").push_bind(page_size);
        items_qb.push(" OFFSET ").push_bind(offset);

        let items = items_qb
            .build_query_as::<PublicVehicleCard>()
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    fn push_public_filters(
        qb: &mut QueryBuilder<'_, Postgres>,
        slug: &str,
        filters: &VehicleFilters,
    ) {
        qb.push(" WHERE g.slug = ").push_bind(slug.to_string());
        qb.push(" AND g.is_publish_enabled = TRUE");
        qb.push(" AND v.status = 'IN_STOCK' AND v.deleted_at IS NULL");

        if let Some(brand) = &filters.brand {
            qb.push(" AND v.brand ILIKE ").push_bind(format!("%{}%", brand));
        }
        if let Some(model) = &filters.model {
            qb.push(" AND v.model ILIKE ").push_bind(format!("%{}%", model));
        }
        if let Some(q) = &filters.q {
            let pattern = format!("%{}%", q);
            qb.push(" AND (v.brand ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR v.model ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR v.version ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(year) = filters.year {
            qb.push(" AND v.year_model = ").push_bind(year);
        }
        // Faixa de preço só faz sentido sobre preços visíveis
        if filters.min_price.is_some() || filters.max_price.is_some() {
            qb.push(" AND v.price IS NOT NULL");
            if let Some(min) = filters.min_price {
                qb.push(" AND v.price >= ").push_bind(min);
            }
            if let Some(max) = filters.max_price {
                qb.push(" AND v.price <= ").push_bind(max);
            }
        }
    }

    pub async fn find_public_vehicle(
        &self,
        slug: &str,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let prefixed = VEHICLE_COLUMNS
            .split(", ")
            .map(|c| format!("v.{}", c))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "SELECT {prefixed} FROM vehicles v JOIN garages g ON g.id = v.garage_id \
             WHERE v.id = $1 AND g.slug = $2 AND g.is_publish_enabled = TRUE \
             AND v.status = 'IN_STOCK' AND v.deleted_at IS NULL"
        );

        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    // Veículo ainda ofertável para receber leads (não deletado)
    pub async fn exists_for_lead(
        &self,
        garage_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM vehicles \
             WHERE id = $1 AND garage_id = $2 AND deleted_at IS NULL)",
        )
        .bind(vehicle_id)
        .bind(garage_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    // ---
    // Galeria de imagens
    // ---

    pub async fn list_images(
        &self,
        garage_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Vec<VehicleImage>, AppError> {
        let images = sqlx::query_as::<_, VehicleImage>(&format!(
            "SELECT vi.{} FROM vehicle_images vi \
             JOIN vehicles v ON v.id = vi.vehicle_id \
             WHERE vi.vehicle_id = $1 AND v.garage_id = $2 \
             ORDER BY vi.position ASC",
            IMAGE_COLUMNS.replace(", ", ", vi.")
        ))
        .bind(vehicle_id)
        .bind(garage_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    // Galeria pública: capa primeiro, depois pela posição
    pub async fn list_images_cover_first(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<VehicleImage>, AppError> {
        let images = sqlx::query_as::<_, VehicleImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM vehicle_images WHERE vehicle_id = $1 \
             ORDER BY is_cover DESC, position ASC"
        ))
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn find_image(
        &self,
        vehicle_id: Uuid,
        image_id: Uuid,
    ) -> Result<Option<VehicleImage>, AppError> {
        let image = sqlx::query_as::<_, VehicleImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM vehicle_images WHERE id = $1 AND vehicle_id = $2"
        ))
        .bind(image_id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn max_position<'e, E>(&self, executor: E, vehicle_id: Uuid) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let max = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(position), 0) FROM vehicle_images WHERE vehicle_id = $1",
        )
        .bind(vehicle_id)
        .fetch_one(executor)
        .await?;

        Ok(max)
    }

    pub async fn clear_covers<'e, E>(&self, executor: E, vehicle_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE vehicle_images SET is_cover = FALSE WHERE vehicle_id = $1 AND is_cover")
            .bind(vehicle_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn has_cover<'e, E>(&self, executor: E, vehicle_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let has = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM vehicle_images WHERE vehicle_id = $1 AND is_cover)",
        )
        .bind(vehicle_id)
        .fetch_one(executor)
        .await?;

        Ok(has)
    }

    pub async fn insert_image<'e, E>(
        &self,
        executor: E,
        vehicle_id: Uuid,
        url: &str,
        is_cover: bool,
        position: i32,
    ) -> Result<VehicleImage, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let image = sqlx::query_as::<_, VehicleImage>(&format!(
            r#"
            INSERT INTO vehicle_images (vehicle_id, url, is_cover, position)
            VALUES ($1, $2, $3, $4)
            RETURNING {IMAGE_COLUMNS}
            "#
        ))
        .bind(vehicle_id)
        .bind(url)
        .bind(is_cover)
        .bind(position)
        .fetch_one(executor)
        .await?;

        Ok(image)
    }

    pub async fn set_cover_flag<'e, E>(&self, executor: E, image_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE vehicle_images SET is_cover = TRUE WHERE id = $1")
            .bind(image_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete_image(
        &self,
        vehicle_id: Uuid,
        image_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM vehicle_images WHERE id = $1 AND vehicle_id = $2")
            .bind(image_id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    fn map_renavam_conflict(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation()
                && db_err.constraint() == Some("idx_vehicles_garage_renavam")
            {
                return AppError::Conflict("Renavam já cadastrado para esta garagem.".to_string());
            }
        }
        e.into()
    }
}
