use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    accounts::{account_tree, ledger, list_accounts, next_code, selectable},
    app::health_check,
    drafts::{delete_draft, get_draft, put_draft},
    journals::{list_journals, validate_journal},
    metrics::metrics,
    reports::{penghasilan_komprehensif, perubahan_aset_neto, posisi_keuangan},
};
use crate::middleware::metrics::metrics_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/tree", get(account_tree))
        .route("/accounts/selectable", get(selectable))
        .route("/accounts/next-code", get(next_code))
        .route("/accounts/:id/ledger", get(ledger))
        .route("/journals", get(list_journals))
        .route("/journals/validate", post(validate_journal))
        .route("/reports/posisi-keuangan", get(posisi_keuangan))
        .route(
            "/reports/penghasilan-komprehensif",
            get(penghasilan_komprehensif),
        )
        .route("/reports/perubahan-aset-neto", get(perubahan_aset_neto))
        .route(
            "/drafts/:key",
            get(get_draft).put(put_draft).delete(delete_draft),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest("/api", api)
        .route_layer(from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost so the trace span sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
