// src/db/audit_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;

// Trilha de auditoria das mutações administrativas. Só escreve, nunca lê.
#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        garage_id: Uuid,
        actor_id: Uuid,
        entity: &str,
        entity_id: Uuid,
        action: &str,
        changes: &Value,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (garage_id, user_id, entity, entity_id, action, changes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(garage_id)
        .bind(actor_id)
        .bind(entity)
        .bind(entity_id)
        .bind(action)
        .bind(changes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
