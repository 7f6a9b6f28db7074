//! # Budget Dashboard Backend
//!
//! Axum server exposing the operations API consumed by the dashboard and
//! serving the built frontend.
//!
//! ## Layout
//!
//! - `domain`: validation, defaults and the balance computation
//! - `storage`: the operation store behind the `OperationStorage` trait
//! - `io::rest`: HTTP handlers and DTO mapping
//! - `config`: environment-driven server settings

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use config::ServerConfig;
use domain::OperationService;
use io::rest::{logging_apis, operation_apis};
use storage::{InMemoryOperationStorage, OperationStorage};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub operation_service: OperationService,
}

impl AppState {
    pub fn new(storage: Arc<dyn OperationStorage>) -> Self {
        Self {
            operation_service: OperationService::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryOperationStorage::new()))
    }
}

/// Build the state, seeding the store when configured to
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    let state = AppState::in_memory();

    if config.seed {
        info!("Seeding sample operations");
        state.operation_service.seed().await?;
    }

    Ok(state)
}

pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/operations",
            get(operation_apis::list_operations).post(operation_apis::create_operation),
        )
        .route(
            "/operations/:id",
            get(operation_apis::get_operation)
                .put(operation_apis::update_operation)
                .delete(operation_apis::delete_operation),
        )
        .route("/logs", post(logging_apis::log_message));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router(state: AppState) -> Router {
        create_router(state, &ServerConfig::default())
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_create_then_list_through_router() {
        let state = AppState::in_memory();

        let (status, created) = send(
            test_router(state.clone()),
            "POST",
            "/api/operations",
            Some(json!({"type": "revenu", "montant": 1000, "source": "Salary"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        send(
            test_router(state.clone()),
            "POST",
            "/api/operations",
            Some(json!({"type": "depense", "montant": 250})),
        )
        .await;

        let (status, listing) = send(test_router(state), "GET", "/api/operations", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listing["solde"], json!(750.0));
        assert_eq!(listing["revenus"][0]["id"], created["id"]);
        assert_eq!(listing["depenses"][0]["categorie"], json!("Miscellaneous"));
    }

    #[tokio::test]
    async fn test_ids_never_collide_across_kinds() {
        let state = AppState::in_memory();
        let (_, income) = send(
            test_router(state.clone()),
            "POST",
            "/api/operations",
            Some(json!({"type": "revenu", "montant": 1})),
        )
        .await;
        let (_, expense) = send(
            test_router(state.clone()),
            "POST",
            "/api/operations",
            Some(json!({"type": "depense", "montant": 1})),
        )
        .await;

        assert_ne!(income["id"], expense["id"]);

        let uri = format!("/api/operations/{}", expense["id"].as_str().unwrap());
        let (status, _) = send(test_router(state.clone()), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(test_router(state.clone()), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Operation not found"}));

        let (_, listing) = send(test_router(state), "GET", "/api/operations", None).await;
        assert_eq!(listing["revenus"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pagination_query() {
        let state = AppState::in_memory();
        for amount in 1..=3 {
            send(
                test_router(state.clone()),
                "POST",
                "/api/operations",
                Some(json!({"type": "depense", "montant": amount, "categorie": "Food"})),
            )
            .await;
        }

        let (_, listing) = send(test_router(state), "GET", "/api/operations?page=2&per_page=2", None).await;
        assert_eq!(listing["depenses"].as_array().unwrap().len(), 1);
        assert_eq!(listing["total_depenses"], json!(3));
        assert_eq!(listing["solde"], json!(-6.0));
    }

    #[tokio::test]
    async fn test_log_endpoint() {
        let (status, body) = send(
            test_router(AppState::in_memory()),
            "POST",
            "/api/logs",
            Some(json!({"level": "info", "message": "dashboard loaded"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_initialize_backend_seeds_when_configured() {
        let config = ServerConfig {
            seed: true,
            ..ServerConfig::default()
        };
        let state = initialize_backend(&config).await.unwrap();

        let (_, listing) = send(test_router(state), "GET", "/api/operations", None).await;
        assert_eq!(listing["solde"], json!(2850.0));

        let empty = initialize_backend(&ServerConfig::default()).await.unwrap();
        let (_, listing) = send(test_router(empty), "GET", "/api/operations", None).await;
        assert_eq!(listing["solde"], json!(0.0));
    }
}
