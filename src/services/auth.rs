// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::{MembershipRepository, UserRepository},
    models::auth::{ActiveGarage, AuthUser, GarageClaim, LoginResponse, UserSummary},
};

// O token vale por 8 horas; depois disso é login de novo
const TOKEN_TTL_HOURS: i64 = 8;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    membership_repo: MembershipRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        membership_repo: MembershipRepository,
        jwt_secret: String,
    ) -> Self {
        Self {
            user_repo,
            membership_repo,
            jwt_secret,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        // A mesma resposta para "usuário não existe" e "senha errada",
        // para não confirmar e-mails cadastrados.
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação bcrypt em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Escolhe a garagem ativa: o primeiro vínculo do usuário
        let memberships = self.membership_repo.find_by_user(user.id).await?;
        let active = memberships.first().ok_or_else(|| {
            AppError::Unauthorized("Usuário sem garagem vinculada.".to_string())
        })?;

        self.user_repo.touch_last_login(user.id).await?;

        let token = self.create_token(
            user.id,
            &user.email,
            GarageClaim {
                id: active.garage_id,
                role: active.role,
            },
        )?;

        Ok(LoginResponse {
            access_token: token,
            user: UserSummary {
                id: user.id,
                email: user.email,
                name: user.name,
            },
            active_garage: ActiveGarage {
                id: active.garage_id,
                slug: active.garage_slug.clone(),
                role: active.role,
            },
        })
    }

    // Só assinatura e expiração; nenhuma consulta ao banco
    pub fn decode_token(&self, token: &str) -> Result<AuthUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<AuthUser>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    fn create_token(
        &self,
        user_id: uuid::Uuid,
        email: &str,
        garage: GarageClaim,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(TOKEN_TTL_HOURS);

        let claims = AuthUser {
            sub: user_id,
            email: email.to_string(),
            garage,
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
