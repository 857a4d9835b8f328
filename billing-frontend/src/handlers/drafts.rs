//! Draft workflow session endpoints.
//!
//! A session wraps one [`DraftWorkflow`] and lives until the client tears it
//! down (or the process restarts; sessions are in-memory only, matching a
//! form that does not survive a page reload).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use billing_core::AppError;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{BillingItem, DocumentDraft, LineItemInput};
use crate::workflow::{DraftWorkflow, Totals};
use crate::AppState;

use super::workflow_error;

/// Snapshot of a draft session for the client.
#[derive(Debug, Serialize)]
pub struct DraftView {
    pub draft_id: Uuid,
    pub phase: &'static str,
    pub document_id: Option<String>,
    pub draft: DocumentDraft,
    pub items: Vec<BillingItem>,
    pub pending_item: LineItemInput,
    pub totals: Totals,
    pub submitting: bool,
}

impl DraftView {
    fn of(draft_id: Uuid, workflow: &DraftWorkflow) -> Self {
        let state = workflow.state();
        Self {
            draft_id,
            phase: state.phase_name(),
            document_id: state.document_id().map(str::to_string),
            draft: state.draft.clone(),
            items: state.items().to_vec(),
            pending_item: state.pending_item.clone(),
            totals: state.totals(),
            submitting: state.is_submitting(),
        }
    }
}

fn lookup(state: &AppState, draft_id: Uuid) -> Result<Arc<Mutex<DraftWorkflow>>, AppError> {
    state
        .drafts
        .get(&draft_id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("no draft session {}", draft_id)))
}

/// Open a new draft session. The body may carry initial document fields;
/// omitted fields take the form defaults (billing date = today).
pub async fn create_draft(
    State(state): State<AppState>,
    draft: Option<Json<DocumentDraft>>,
) -> Result<Json<DraftView>, AppError> {
    let draft = draft.map(|Json(d)| d).unwrap_or_default();
    let draft_id = Uuid::new_v4();
    let workflow = DraftWorkflow::with_draft(state.billing_client.clone(), draft);

    let view = DraftView::of(draft_id, &workflow);
    state
        .drafts
        .insert(draft_id, Arc::new(Mutex::new(workflow)));

    tracing::info!(draft_id = %draft_id, "draft session opened");
    Ok(Json(view))
}

pub async fn get_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<DraftView>, AppError> {
    let session = lookup(&state, draft_id)?;
    let workflow = session.lock().await;
    Ok(Json(DraftView::of(draft_id, &workflow)))
}

/// Replace the draft's document-level fields. Refused once created.
pub async fn update_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(draft): Json<DocumentDraft>,
) -> Result<Json<DraftView>, AppError> {
    let session = lookup(&state, draft_id)?;
    let mut workflow = session.lock().await;
    workflow.update_draft(draft).map_err(workflow_error)?;
    Ok(Json(DraftView::of(draft_id, &workflow)))
}

/// Submit the draft for creation and enter item-entry mode.
pub async fn submit_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<DraftView>, AppError> {
    let session = lookup(&state, draft_id)?;
    let mut workflow = session.lock().await;
    workflow.submit_draft().await.map_err(workflow_error)?;
    Ok(Json(DraftView::of(draft_id, &workflow)))
}

pub async fn add_line_item(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(candidate): Json<LineItemInput>,
) -> Result<Json<DraftView>, AppError> {
    let session = lookup(&state, draft_id)?;
    let mut workflow = session.lock().await;
    workflow
        .add_line_item(candidate)
        .await
        .map_err(workflow_error)?;
    Ok(Json(DraftView::of(draft_id, &workflow)))
}

pub async fn remove_line_item(
    State(state): State<AppState>,
    Path((draft_id, item_id)): Path<(Uuid, String)>,
) -> Result<Json<DraftView>, AppError> {
    let session = lookup(&state, draft_id)?;
    let mut workflow = session.lock().await;
    workflow
        .remove_line_item(&item_id)
        .await
        .map_err(workflow_error)?;
    Ok(Json(DraftView::of(draft_id, &workflow)))
}

/// Tear the session down. Responses still in flight die with it.
pub async fn close_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<(), AppError> {
    match state.drafts.remove(&draft_id) {
        Some(_) => {
            tracing::info!(draft_id = %draft_id, "draft session closed");
            Ok(())
        }
        None => Err(AppError::NotFound(anyhow::anyhow!(
            "no draft session {}",
            draft_id
        ))),
    }
}
