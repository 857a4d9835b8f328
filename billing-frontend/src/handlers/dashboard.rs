use axum::{extract::State, Json};
use billing_core::AppError;

use crate::models::DashboardStats;
use crate::AppState;

use super::api_error;

/// Dashboard stats, fetched fresh from the billing API on every request.
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = state
        .billing_client
        .dashboard_stats()
        .await
        .map_err(api_error)?;

    Ok(Json(stats))
}
