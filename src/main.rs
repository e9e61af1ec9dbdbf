// src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

// Upload de até 10 imagens de 5MB + overhead do multipart
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação: login é público, /me exige token
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    // Tudo aqui dentro passa pelo auth_guard; a allow-list de papéis
    // fica em cada handler (RequireRole)
    let protected_routes = Router::new()
        .route(
            "/garage/me",
            get(handlers::garage::get_my_garage).put(handlers::garage::update_my_garage),
        )
        .route(
            "/garage/users",
            get(handlers::garage_users::list).post(handlers::garage_users::create),
        )
        .route(
            "/garage/users/{user_id}",
            put(handlers::garage_users::update).delete(handlers::garage_users::remove),
        )
        .route("/vehicles", post(handlers::vehicles::create))
        .route("/vehicles/admin", get(handlers::vehicles::list_admin))
        .route(
            "/vehicles/{id}",
            get(handlers::vehicles::get)
                .put(handlers::vehicles::update)
                .delete(handlers::vehicles::remove),
        )
        .route(
            "/vehicles/{id}/images",
            post(handlers::vehicles::upload_images)
                .get(handlers::vehicles::list_images)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/vehicles/{id}/images/{image_id}",
            delete(handlers::vehicles::remove_image),
        )
        .route(
            "/vehicles/{id}/images/{image_id}/cover",
            patch(handlers::vehicles::set_cover),
        )
        .route("/leads", get(handlers::leads::list))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Vitrine pública: sem token
    let public_routes = Router::new()
        .route(
            "/public/{garage_slug}/garage",
            get(handlers::public::get_garage),
        )
        .route(
            "/public/{garage_slug}/vehicles",
            get(handlers::public::list_vehicles),
        )
        .route(
            "/public/{garage_slug}/vehicles/{id}",
            get(handlers::public::get_vehicle),
        )
        .route(
            "/public/{garage_slug}/leads",
            post(handlers::public::create_lead),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/v1/auth", auth_routes)
        .nest("/v1", protected_routes)
        .nest("/v1", public_routes)
        .nest_service("/uploads", ServeDir::new(&app_state.upload_dir))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
