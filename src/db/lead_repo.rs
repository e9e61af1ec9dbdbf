// src/db/lead_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{LeadCreated, LeadSource, LeadStatus},
};

// Linha "achatada" da listagem: lead + referência rasa ao veículo (LEFT JOIN)
#[derive(Debug, sqlx::FromRow)]
pub struct LeadWithVehicleRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_version: Option<String>,
    pub vehicle_year_model: Option<i32>,
}

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        garage_id: Uuid,
        vehicle_id: Option<Uuid>,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        message: Option<&str>,
        consent_lgpd: bool,
    ) -> Result<LeadCreated, AppError> {
        // Todo lead da vitrine nasce NEW / FORM
        let lead = sqlx::query_as::<_, LeadCreated>(
            r#"
            INSERT INTO leads (garage_id, vehicle_id, name, email, phone, message,
                               consent_lgpd, status, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, email, phone, message, created_at
            "#,
        )
        .bind(garage_id)
        .bind(vehicle_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(message)
        .bind(consent_lgpd)
        .bind(LeadStatus::New)
        .bind(LeadSource::Form)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    pub async fn list(
        &self,
        garage_id: Uuid,
        q: Option<&str>,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<LeadWithVehicleRow>, i64), AppError> {
        let mut count_qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM leads l");
        Self::push_filters(&mut count_qb, garage_id, q);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut items_qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT l.id, l.name, l.email, l.phone, l.message, l.status, l.created_at, \
             v.id AS vehicle_id, v.brand AS vehicle_brand, v.model AS vehicle_model, \
             v.version AS vehicle_version, v.year_model AS vehicle_year_model \
             FROM leads l LEFT JOIN vehicles v ON v.id = l.vehicle_id",
        );
        Self::push_filters(&mut items_qb, garage_id, q);
        items_qb.push(" ORDER BY l.created_at DESC");
        items_qb.push(" LIMIT ").push_bind(page_size);
        items_qb.push(" OFFSET ").push_bind(offset);

        let items = items_qb
            .build_query_as::<LeadWithVehicleRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, garage_id: Uuid, q: Option<&str>) {
        qb.push(" WHERE l.garage_id = ").push_bind(garage_id);
        if let Some(text) = q {
            let pattern = format!("%{}%", text);
            qb.push(" AND (l.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR l.email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR l.phone ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}
