// src/server/handlers.rs
//! HTTP handler functions for the extraction API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use tokio::task::JoinError;

use crate::extractors::{Extraction, Record, ReportExtractor, SkippedEntry};
use crate::utils::error::{ApiError, ExtractError};

/// Body of `POST /process_pdf`. Missing fields deserialize as empty and are rejected afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub toc_text: String,
    #[serde(default)]
    pub pdf_text: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub results: Vec<Record>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /process_pdf`
///
/// Runs the extractor on the blocking pool. A panic inside the extractor is
/// reported as a 500 rather than tearing down the connection.
pub async fn process_pdf(
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;

    if request.toc_text.is_empty() || request.pdf_text.is_empty() {
        return Err(ApiError::InvalidInput(
            "toc_text and pdf_text must both be non-empty".to_string(),
        ));
    }

    tracing::debug!(
        toc_bytes = request.toc_text.len(),
        pdf_bytes = request.pdf_text.len(),
        "Processing extraction request"
    );

    let extraction = tokio::task::spawn_blocking(move || {
        ReportExtractor::new().extract(&request.toc_text, &request.pdf_text)
    })
    .await;
    let extraction = join_extraction(extraction)?;

    Ok(Json(ProcessResponse {
        results: extraction.records,
        skipped: extraction.skipped,
    }))
}

/// Flattens the blocking task result. A panicked or cancelled task becomes an internal error.
fn join_extraction(
    joined: Result<Result<Extraction, ExtractError>, JoinError>,
) -> Result<Extraction, ApiError> {
    let result = joined.map_err(|e| ApiError::Internal(format!("Extraction task failed: {}", e)))?;
    Ok(result?)
}
