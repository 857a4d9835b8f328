use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use billing_core::middleware::request_id_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    app::health_check,
    dashboard::dashboard_stats,
    documents::list_documents,
    drafts::{
        add_line_item, close_draft, create_draft, get_draft, remove_line_item, submit_draft,
        update_draft,
    },
};
use crate::services::metrics::metrics_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(crate::handlers::metrics::metrics))
        .route("/api/dashboard", get(dashboard_stats))
        .route("/api/documents", get(list_documents))
        .route("/api/drafts", post(create_draft))
        .route(
            "/api/drafts/:draft_id",
            get(get_draft).put(update_draft).delete(close_draft),
        )
        .route("/api/drafts/:draft_id/submit", post(submit_draft))
        .route("/api/drafts/:draft_id/items", post(add_line_item))
        .route(
            "/api/drafts/:draft_id/items/:item_id",
            axum::routing::delete(remove_line_item),
        )
        .layer(CorsLayer::permissive())
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
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
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
