use axum::{
    extract::{Query, State},
    Json,
};
use billing_core::AppError;
use serde::Deserialize;

use crate::models::BillingDocument;
use crate::views::filter_documents;
use crate::AppState;

use super::api_error;

#[derive(Deserialize)]
pub struct ListParams {
    /// Case-insensitive substring matched against customer name, document
    /// number, and billing type.
    pub q: Option<String>,
}

/// Document list: one fetch, then a deterministic client-side filter.
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BillingDocument>>, AppError> {
    let documents = state
        .billing_client
        .list_documents()
        .await
        .map_err(api_error)?;

    let filtered: Vec<BillingDocument> = filter_documents(&documents, params.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(filtered))
}
