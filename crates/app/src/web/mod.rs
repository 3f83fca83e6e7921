//! Form-based web front end: every request re-runs its flow to completion.

use axum::{routing::get, Router};
use scholarly_insight_core::{PaperSearch, Summarizer, TextGenerator};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod render;

pub struct AppState {
    pub search: Arc<dyn PaperSearch>,
    pub summarizer: Summarizer<Arc<dyn TextGenerator>>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::search_page))
        .route("/summarize", get(handlers::summarize_page))
        .route("/lookup", get(handlers::lookup_page))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
