pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;
use crate::submission::handlers;
use crate::submission::uploads::PUBLIC_PREFIX;

pub fn build_router(state: AppState) -> Router {
    let index = ServeFile::new(&state.config.index_file);
    let uploads = ServeDir::new(state.uploads.dir());
    let public = ServeDir::new(&state.config.public_dir);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/submit", post(handlers::handle_submit).layer(body_limit))
        .route_service("/", index)
        .nest_service(PUBLIC_PREFIX, uploads)
        .fallback_service(public)
        .with_state(state)
}
