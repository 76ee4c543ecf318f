// Route table of the page host
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_detail_point, add_maintenance, asset_page, delete_detail_point, edit_detail_point, health_check,
    reports_page,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/asset/:id", get(asset_page))
        .route("/asset/:id/detail-points", post(add_detail_point))
        .route("/asset/:id/maintenance", post(add_maintenance))
        .route("/asset/:id/detail-points/:point_id/delete", post(delete_detail_point))
        .route("/asset/:id/detail-points/:point_id/edit", get(edit_detail_point))
        .route("/reports", get(reports_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
