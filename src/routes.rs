use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers::{self, AppState};

/// The `/api` routes: company listing and the two export downloads.
///
/// Left without state so the caller can add its own protection layers before
/// calling `with_state`.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/empresas", get(handlers::list_companies))
        .route(
            "/api/export/cadtipopag",
            get(handlers::export_payment_types),
        )
        .route("/api/export/cadtpg", get(handlers::export_payment_terms))
}

/// Full application router without rate limiting.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes())
        .with_state(state)
}
