use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use tower::ServiceExt;

// Router mínimo com o mesmo formato de resposta do app real,
// para exercitar o roteamento sem precisar de banco.
fn create_test_app() -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/v1/public/{garage_slug}/leads",
            post(|| async { StatusCode::CREATED }),
        )
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_rota_desconhecida_responde_404() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/nao-existe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metodo_errado_responde_405() {
    let app = create_test_app();

    // GET numa rota que só aceita POST
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/public/garagem-teste/leads")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_slug_com_parametro_casa_na_rota() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/public/garagem-alto-vale/leads")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}
