use std::sync::Arc;

use crate::config::Config;
use crate::submission::store::SubmissionStore;
use crate::submission::uploads::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Postgres in production, in-memory in tests.
    pub store: Arc<dyn SubmissionStore>,
    pub uploads: UploadStore,
    pub config: Config,
}
