use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub mod read;
pub mod types;
pub mod upload;

pub use read::*;
pub use types::*;
pub use upload::*;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload-single", post(upload_single))
        .route("/upload-multiple", post(upload_multiple))
        .route("/result/{file_id}", get(get_result))
        .route("/chunks/{file_id}", get(get_chunks))
        .route("/history", get(get_history))
}
