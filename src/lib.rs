pub mod auth;
pub mod chunking;
pub mod config;
pub mod db;
pub mod errors;
pub mod extractor;
pub mod ingestion;
pub mod models;
pub mod routes;
pub mod services;
pub mod swagger;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{http::StatusCode, Json};
use config::Config;
use db::Database;
use extractor::TextExtractor;
use services::storage_service::StorageService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub extractor: Arc<dyn TextExtractor>,
    pub storage: Option<Arc<StorageService>>,
}

/// Health check endpoint for monitoring
pub async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({"status": "ok"})))
}
