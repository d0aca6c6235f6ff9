pub mod config;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod startup;

use services::backend_client::BackendApi;
use services::draft_store::DraftDebouncer;
use std::sync::Arc;

/// Shared application state: the backend client and the draft store.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendApi>,
    pub drafts: Arc<DraftDebouncer>,
}

impl AppState {
    pub fn new(backend: Arc<dyn BackendApi>, drafts: Arc<DraftDebouncer>) -> Self {
        Self { backend, drafts }
    }
}
