// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AuditRepository, GarageRepository, LeadRepository, MembershipRepository, UserRepository,
        VehicleRepository,
    },
    services::{
        auth::AuthService, garage_service::GarageService, lead_service::LeadService,
        membership_service::MembershipService, public_service::PublicService,
        vehicle_service::VehicleService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub upload_dir: String,
    pub auth_service: AuthService,
    pub garage_service: GarageService,
    pub membership_service: MembershipService,
    pub vehicle_service: VehicleService,
    pub lead_service: LeadService,
    pub public_service: PublicService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Repositórios ---
        let user_repo = UserRepository::new(db_pool.clone());
        let garage_repo = GarageRepository::new(db_pool.clone());
        let membership_repo = MembershipRepository::new(db_pool.clone());
        let vehicle_repo = VehicleRepository::new(db_pool.clone());
        let lead_repo = LeadRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());

        // --- Serviços ---
        let auth_service = AuthService::new(
            user_repo.clone(),
            membership_repo.clone(),
            jwt_secret.clone(),
        );
        let garage_service = GarageService::new(garage_repo.clone());
        let membership_service = MembershipService::new(
            user_repo,
            membership_repo,
            audit_repo,
            db_pool.clone(),
        );
        let vehicle_service = VehicleService::new(vehicle_repo.clone(), db_pool.clone());
        let lead_service = LeadService::new(lead_repo, garage_repo.clone(), vehicle_repo.clone());
        let public_service = PublicService::new(garage_repo, vehicle_repo);

        Ok(Self {
            db_pool,
            upload_dir,
            auth_service,
            garage_service,
            membership_service,
            vehicle_service,
            lead_service,
            public_service,
        })
    }
}
