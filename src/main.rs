use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use lexocr::{
    config::Config,
    db::Database,
    extractor::PythonOcrExtractor,
    routes,
    services::{file_service::FileService, storage_service::StorageService},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let db = Database::new(&config.database_url).await?;

    info!("Running database migrations...");
    db.migrate().await?;

    let file_service = FileService::new(config.temp_path.clone());
    file_service.initialize_directory_structure().await?;

    let extractor = Arc::new(PythonOcrExtractor::new(
        config.python_binary.clone(),
        config.ocr_script_path.clone(),
        Duration::from_secs(config.extractor_timeout_seconds),
    ));

    let storage = match &config.s3 {
        Some(s3_config) => match StorageService::new(s3_config.clone()).await {
            Ok(service) => Some(Arc::new(service)),
            Err(e) => {
                // The mirror step is best-effort; the pipeline runs without it.
                warn!("Object storage disabled: {}", e);
                None
            }
        },
        None => None,
    };

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        extractor,
        storage,
    });

    // Allow headroom for a full batch of maximum-size files plus form framing.
    let body_limit = (config.max_file_size_bytes() as usize)
        * (routes::documents::MAX_BATCH_FILES + 1);

    let app = Router::new()
        .route("/api/health", get(lexocr::health_check))
        .nest("/api/auth", routes::auth::router())
        .nest("/api/documents", routes::documents::router())
        .merge(lexocr::swagger::create_swagger_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app).await?;

    Ok(())
}
