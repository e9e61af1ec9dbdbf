// src/db/membership_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::membership::{GarageMember, GarageRole, GarageUser},
};

// Vínculo + slug da garagem, usado na escolha da garagem ativa no login
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MembershipWithGarage {
    pub garage_id: Uuid,
    pub garage_slug: String,
    pub role: GarageRole,
}

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Todos os vínculos de um usuário, na ordem em que foram criados.
    // O primeiro vira a garagem ativa do token.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<MembershipWithGarage>, AppError> {
        let memberships = sqlx::query_as::<_, MembershipWithGarage>(
            r#"
            SELECT gu.garage_id, g.slug AS garage_slug, gu.role
            FROM garage_users gu
            JOIN garages g ON g.id = gu.garage_id
            WHERE gu.user_id = $1
            ORDER BY gu.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(memberships)
    }

    pub async fn find_link(
        &self,
        garage_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<GarageUser>, AppError> {
        let link = sqlx::query_as::<_, GarageUser>(
            r#"
            SELECT garage_id, user_id, role, created_at
            FROM garage_users
            WHERE garage_id = $1 AND user_id = $2
            "#,
        )
        .bind(garage_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    pub async fn count_owners(&self, garage_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM garage_users WHERE garage_id = $1 AND role = 'OWNER'",
        )
        .bind(garage_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn insert_link<'e, E>(
        &self,
        executor: E,
        garage_id: Uuid,
        user_id: Uuid,
        role: GarageRole,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO garage_users (garage_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(garage_id)
            .bind(user_id)
            .bind(role)
            .execute(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some("garage_users_pkey")
                    {
                        return AppError::Conflict(
                            "Usuário já vinculado a esta garagem.".to_string(),
                        );
                    }
                }
                e.into()
            })?;

        Ok(())
    }

    pub async fn update_role<'e, E>(
        &self,
        executor: E,
        garage_id: Uuid,
        user_id: Uuid,
        role: GarageRole,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE garage_users SET role = $3 WHERE garage_id = $1 AND user_id = $2")
            .bind(garage_id)
            .bind(user_id)
            .bind(role)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete_link(&self, garage_id: Uuid, user_id: Uuid) -> Result<u64, AppError> {
        let result =
            sqlx::query("DELETE FROM garage_users WHERE garage_id = $1 AND user_id = $2")
                .bind(garage_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    // Listagem paginada de membros, com busca por nome/e-mail.
    // Ordena por papel (OWNER primeiro) e depois por nome.
    pub async fn list_members(
        &self,
        garage_id: Uuid,
        q: Option<&str>,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<GarageMember>, i64), AppError> {
        let mut count_qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT COUNT(*) FROM garage_users gu JOIN users u ON u.id = gu.user_id",
        );
        Self::push_member_filters(&mut count_qb, garage_id, q);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut items_qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT gu.user_id, gu.role, u.name, u.email, u.last_login_at, u.created_at \
             FROM garage_users gu JOIN users u ON u.id = gu.user_id",
        );
        Self::push_member_filters(&mut items_qb, garage_id, q);
        items_qb.push(" ORDER BY gu.role ASC, u.name ASC");
        items_qb.push(" LIMIT ").push_bind(page_size);
        items_qb.push(" OFFSET ").push_bind(offset);

        let items = items_qb
            .build_query_as::<GarageMember>()
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    fn push_member_filters(qb: &mut QueryBuilder<'_, Postgres>, garage_id: Uuid, q: Option<&str>) {
        qb.push(" WHERE gu.garage_id = ").push_bind(garage_id);
        if let Some(text) = q {
            let pattern = format!("%{}%", text);
            qb.push(" AND (u.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.email ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}
