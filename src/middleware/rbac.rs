// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::AuthUser, models::membership::GarageRole};

/// 1. O Trait que define um conjunto de papéis permitidos
pub trait RoleSet: Send + Sync + 'static {
    fn allowed() -> &'static [GarageRole];
}

/// 2. A checagem em si: função pura de (papel do token, allow-list)
pub fn role_allowed(role: GarageRole, allowed: &[GarageRole]) -> bool {
    allowed.contains(&role)
}

/// 3. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleSet,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai os claims deixados pelo auth_guard
        let user = parts
            .extensions
            .get::<AuthUser>()
            .ok_or(AppError::InvalidToken)?;

        // B. Compara com a allow-list do endpoint
        if !role_allowed(user.garage.role, T::allowed()) {
            return Err(AppError::Forbidden(
                "Seu papel não permite realizar esta ação.".to_string(),
            ));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS CONJUNTOS DE PAPÉIS
// ---

// Qualquer membro da garagem (leitura)
pub struct AnyMember;
impl RoleSet for AnyMember {
    fn allowed() -> &'static [GarageRole] {
        &[
            GarageRole::Owner,
            GarageRole::Admin,
            GarageRole::Editor,
            GarageRole::Viewer,
        ]
    }
}

// Quem pode editar conteúdo (veículos, perfil da garagem)
pub struct ContentEditors;
impl RoleSet for ContentEditors {
    fn allowed() -> &'static [GarageRole] {
        &[GarageRole::Owner, GarageRole::Admin, GarageRole::Editor]
    }
}

// Quem pode gerenciar usuários e remover registros
pub struct UserManagers;
impl RoleSet for UserManagers {
    fn allowed() -> &'static [GarageRole] {
        &[GarageRole::Owner, GarageRole::Admin]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_pode_ler_mas_nao_editar() {
        assert!(role_allowed(GarageRole::Viewer, AnyMember::allowed()));
        assert!(!role_allowed(GarageRole::Viewer, ContentEditors::allowed()));
        assert!(!role_allowed(GarageRole::Viewer, UserManagers::allowed()));
    }

    #[test]
    fn editor_edita_conteudo_mas_nao_gerencia_usuarios() {
        assert!(role_allowed(GarageRole::Editor, ContentEditors::allowed()));
        assert!(!role_allowed(GarageRole::Editor, UserManagers::allowed()));
    }

    #[test]
    fn owner_e_admin_gerenciam_usuarios() {
        assert!(role_allowed(GarageRole::Owner, UserManagers::allowed()));
        assert!(role_allowed(GarageRole::Admin, UserManagers::allowed()));
    }
}
