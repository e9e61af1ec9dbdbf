// src/services/membership_service.rs

use bcrypt::hash;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{clamp, offset, Page},
    },
    db::{AuditRepository, MembershipRepository, UserRepository},
    models::membership::{
        CreateGarageUserPayload, GarageMember, GarageRole, ListMembersQuery,
        UpdateGarageUserPayload,
    },
};

// Senha provisória de quem é convidado sem definir uma
const DEFAULT_INVITE_PASSWORD: &str = "changeme123";

#[derive(Clone)]
pub struct MembershipService {
    user_repo: UserRepository,
    membership_repo: MembershipRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl MembershipService {
    pub fn new(
        user_repo: UserRepository,
        membership_repo: MembershipRepository,
        audit_repo: AuditRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            membership_repo,
            audit_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        garage_id: Uuid,
        query: &ListMembersQuery,
    ) -> Result<Page<GarageMember>, AppError> {
        let (page, page_size) = clamp(query.page, query.page_size);
        let (items, total) = self
            .membership_repo
            .list_members(
                garage_id,
                query.q.as_deref(),
                page_size,
                offset(page, page_size),
            )
            .await?;

        Ok(Page {
            items,
            page,
            page_size,
            total,
        })
    }

    // Vincula um usuário existente (por e-mail global) ou cria um novo.
    pub async fn create(
        &self,
        garage_id: Uuid,
        actor_id: Uuid,
        payload: &CreateGarageUserPayload,
    ) -> Result<Uuid, AppError> {
        let existing = self.user_repo.find_by_email(&payload.email).await?;

        if let Some(user) = &existing {
            if self
                .membership_repo
                .find_link(garage_id, user.id)
                .await?
                .is_some()
            {
                return Err(AppError::Conflict(
                    "Usuário já vinculado a esta garagem.".to_string(),
                ));
            }
        }

        let password = payload
            .password
            .clone()
            .unwrap_or_else(|| DEFAULT_INVITE_PASSWORD.to_string());
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // Criar o usuário e vinculá-lo é tudo-ou-nada
        let mut tx = self.pool.begin().await?;

        let user_id = match existing {
            Some(user) => user.id,
            None => {
                self.user_repo
                    .create_user(&mut *tx, &payload.email, &payload.name, &password_hash)
                    .await?
                    .id
            }
        };

        self.membership_repo
            .insert_link(&mut *tx, garage_id, user_id, payload.role)
            .await?;

        tx.commit().await?;

        self.audit_repo
            .insert(
                garage_id,
                actor_id,
                "GARAGE",
                garage_id,
                "UPDATE",
                &json!({ "addUser": { "userId": user_id, "role": payload.role } }),
            )
            .await?;

        Ok(user_id)
    }

    pub async fn update(
        &self,
        garage_id: Uuid,
        actor_id: Uuid,
        target_user_id: Uuid,
        payload: &UpdateGarageUserPayload,
    ) -> Result<(), AppError> {
        let link = self
            .membership_repo
            .find_link(garage_id, target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não vinculado à garagem.".to_string()))?;

        // Piso de OWNER: rebaixar o último OWNER (inclusive a si mesmo) é proibido
        if let Some(new_role) = payload.role {
            if link.role == GarageRole::Owner && new_role != GarageRole::Owner {
                let owners = self.membership_repo.count_owners(garage_id).await?;
                if owners <= 1 {
                    return Err(AppError::Forbidden(
                        "Não é permitido rebaixar o último OWNER da garagem.".to_string(),
                    ));
                }
            }
        }

        let password_hash = match payload.password.clone() {
            Some(password) => Some(
                tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                    .await
                    .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??,
            ),
            None => None,
        };

        if payload.name.is_none() && password_hash.is_none() && payload.role.is_none() {
            return Ok(());
        }

        // Perfil e role saem juntos ou não saem
        let mut tx = self.pool.begin().await?;

        if payload.name.is_some() || password_hash.is_some() {
            self.user_repo
                .update_profile(
                    &mut *tx,
                    target_user_id,
                    payload.name.as_deref(),
                    password_hash.as_deref(),
                )
                .await?;
        }

        if let Some(new_role) = payload.role {
            self.membership_repo
                .update_role(&mut *tx, garage_id, target_user_id, new_role)
                .await?;
        }

        tx.commit().await?;

        // A senha fica de fora da trilha de auditoria
        self.audit_repo
            .insert(
                garage_id,
                actor_id,
                "GARAGE",
                garage_id,
                "UPDATE",
                &json!({
                    "updateUser": {
                        "userId": target_user_id,
                        "name": payload.name,
                        "role": payload.role,
                    }
                }),
            )
            .await?;

        Ok(())
    }

    pub async fn remove(
        &self,
        garage_id: Uuid,
        actor_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<(), AppError> {
        let link = self
            .membership_repo
            .find_link(garage_id, target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não vinculado à garagem.".to_string()))?;

        if link.role == GarageRole::Owner {
            let owners = self.membership_repo.count_owners(garage_id).await?;
            if owners <= 1 {
                return Err(AppError::Forbidden(
                    "Não é permitido remover o último OWNER da garagem.".to_string(),
                ));
            }
        }

        self.membership_repo
            .delete_link(garage_id, target_user_id)
            .await?;

        self.audit_repo
            .insert(
                garage_id,
                actor_id,
                "GARAGE",
                garage_id,
                "UPDATE",
                &json!({ "removeUser": { "userId": target_user_id } }),
            )
            .await?;

        Ok(())
    }
}
