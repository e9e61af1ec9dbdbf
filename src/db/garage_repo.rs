// src/db/garage_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::garage::{Garage, GaragePublic, UpdateGaragePayload},
};

#[derive(Clone)]
pub struct GarageRepository {
    pool: PgPool,
}

const GARAGE_COLUMNS: &str = "id, name, slug, doc, phone_whatsapp, address_line, city, state, \
     zip, website, instagram, facebook, theme_primary_color, is_publish_enabled, \
     created_at, updated_at";

impl GarageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Garage>, AppError> {
        let garage = sqlx::query_as::<_, Garage>(&format!(
            "SELECT {GARAGE_COLUMNS} FROM garages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(garage)
    }

    // Resolve o slug sem olhar o flag de publicação (captação de leads)
    pub async fn find_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM garages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    // Vitrine: slug inexistente e garagem despublicada são indistinguíveis
    pub async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<GaragePublic>, AppError> {
        let garage = sqlx::query_as::<_, GaragePublic>(
            r#"
            SELECT name, slug, city, state, phone_whatsapp, instagram, facebook,
                   website, theme_primary_color
            FROM garages
            WHERE slug = $1 AND is_publish_enabled = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(garage)
    }

    // Atualização parcial: campos nulos do payload ficam como estão
    pub async fn update_profile(
        &self,
        garage_id: Uuid,
        payload: &UpdateGaragePayload,
    ) -> Result<Option<Garage>, AppError> {
        let garage = sqlx::query_as::<_, Garage>(&format!(
            r#"
            UPDATE garages
            SET name = COALESCE($2, name),
                doc = COALESCE($3, doc),
                phone_whatsapp = COALESCE($4, phone_whatsapp),
                address_line = COALESCE($5, address_line),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                zip = COALESCE($8, zip),
                website = COALESCE($9, website),
                instagram = COALESCE($10, instagram),
                facebook = COALESCE($11, facebook),
                theme_primary_color = COALESCE($12, theme_primary_color),
                is_publish_enabled = COALESCE($13, is_publish_enabled),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {GARAGE_COLUMNS}
            "#
        ))
        .bind(garage_id)
        .bind(payload.name.as_deref())
        .bind(payload.doc.as_deref())
        .bind(payload.phone_whatsapp.as_deref())
        .bind(payload.address_line.as_deref())
        .bind(payload.city.as_deref())
        .bind(payload.state.as_deref())
        .bind(payload.zip.as_deref())
        .bind(payload.website.as_deref())
        .bind(payload.instagram.as_deref())
        .bind(payload.facebook.as_deref())
        .bind(payload.theme_primary_color.as_deref())
        .bind(payload.is_publish_enabled)
        .fetch_optional(&self.pool)
        .await?;

        Ok(garage)
    }
}
