// src/server/mod.rs
//! JSON API around the report extractor.
//!
//! - `POST /process_pdf` - extract records from `{ toc_text, pdf_text }`
//! - `GET /health` - liveness and version

pub mod handlers;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::utils::AppError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024; // extracted reports run to several MB

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Builds the application router. Handlers are stateless.
pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/process_pdf", post(handlers::process_pdf))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind((config.bind_addr.as_str(), config.port)).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving rather than exiting immediately
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_server(config: ServerConfig) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(&config)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_process_pdf_round_trip() {
        let base = spawn_server(ServerConfig::default()).await;

        let response = reqwest::Client::new()
            .post(format!("{}/process_pdf", base))
            .json(&serde_json::json!({
                "toc_text": "• 1.1 Ensure Test Item ...... 5\n• 1.2 Ensure Missing Item ...... 6",
                "pdf_text": "1.1 Ensure Test Item ** FAILED ** Info Do X. Solution Do Y. References http://a References Audit File cmd --check Policy Value true Hosts host1",
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body["results"],
            serde_json::json!([{
                "number": "1.1",
                "description": "Ensure Test Item",
                "type": "FAILED",
                "info": "Do X.",
                "solution": "Do Y.",
                "references": ["http://a"],
                "auditFile": "cmd --check",
                "policyValue": "true",
            }])
        );
        assert_eq!(body["skipped"][0]["anchor"], "1.2 Ensure Missing Item");
    }

    #[tokio::test]
    async fn test_bad_requests_get_json_errors() {
        let base = spawn_server(ServerConfig::default()).await;
        let client = reqwest::Client::new();

        let missing = client
            .post(format!("{}/process_pdf", base))
            .json(&serde_json::json!({ "toc_text": "• 1.1 A ...... 1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = missing.json().await.unwrap();
        assert!(body["error"].is_string());
        assert!(body.get("results").is_none());

        let malformed = client
            .post(format!("{}/process_pdf", base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(malformed.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = malformed.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let base = spawn_server(ServerConfig { body_limit: 64, ..ServerConfig::default() }).await;

        let response = reqwest::Client::new()
            .post(format!("{}/process_pdf", base))
            .json(&serde_json::json!({ "toc_text": "x".repeat(200), "pdf_text": "y" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let base = spawn_server(ServerConfig::default()).await;
        let body: serde_json::Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["healthy"], true);
    }
}
