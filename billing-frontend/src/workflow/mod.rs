//! Document draft workflow.
//!
//! Owns the lifecycle of one in-progress billing document: create the parent
//! document, then attach and remove line items one round trip at a time,
//! keeping local state consistent with what the server has confirmed. The
//! item list is replaced wholesale with every successful mutation response,
//! so local totals can never drift from server arithmetic.

pub mod state;

use std::sync::Arc;

use crate::models::{BillingDocument, DocumentDraft, LineItemInput};
use crate::services::{ApiError, BillingApi};

pub use state::{DraftPhase, DraftState, Totals};

/// Why a workflow operation was refused or failed.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("document already created; drafts are submitted once")]
    AlreadyCreated,

    #[error("a create request is already in flight")]
    SubmitInFlight,

    #[error("document not yet created; add or remove items after submitting")]
    NotCreated,

    #[error("an item mutation is already in flight")]
    MutationInFlight,

    #[error("invalid line item: {0}")]
    InvalidItem(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Async driver for one draft: binds [`DraftState`] to the billing API seam
/// and applies transitions around each round trip.
pub struct DraftWorkflow {
    state: DraftState,
    client: Arc<dyn BillingApi>,
}

impl DraftWorkflow {
    pub fn new(client: Arc<dyn BillingApi>) -> Self {
        Self {
            state: DraftState::default(),
            client,
        }
    }

    pub fn with_draft(client: Arc<dyn BillingApi>, draft: DocumentDraft) -> Self {
        Self {
            state: DraftState::new(draft),
            client,
        }
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// Replace the draft's document-level fields. Refused once created.
    pub fn update_draft(&mut self, draft: DocumentDraft) -> Result<(), WorkflowError> {
        self.state.update_draft(draft)
    }

    /// Submit the draft for creation.
    ///
    /// Exactly one document is created server-side per successful call. The
    /// operation is not idempotent and is never auto-retried: after a
    /// transport failure with unknown server-side outcome, a manual retry can
    /// create a duplicate document. The backing API has no idempotency key to
    /// offer, so that limitation is kept rather than papered over.
    pub async fn submit_draft(&mut self) -> Result<BillingDocument, WorkflowError> {
        self.state.begin_submit()?;

        match self.client.create_document(&self.state.draft).await {
            Ok(document) => {
                tracing::info!(
                    document_id = %document.id,
                    document_number = %document.document_number,
                    "billing document created"
                );
                self.state.created(&document);
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create document failed");
                self.state.submit_failed();
                Err(e.into())
            }
        }
    }

    /// Add a line item to the created document.
    ///
    /// The candidate is validated locally first; a violation reports without
    /// a network call. On success the local list becomes the server's
    /// returned list and the pending input resets to defaults.
    pub async fn add_line_item(&mut self, candidate: LineItemInput) -> Result<(), WorkflowError> {
        let (document_id, seq) = self.state.begin_add(&candidate)?;

        match self.client.add_item(&document_id, &candidate).await {
            Ok(items) => {
                if self.state.apply_items(seq, items) {
                    self.state.clear_pending_item();
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(document_id = %document_id, error = %e, "add line item failed");
                self.state.mutation_failed(seq);
                Err(e.into())
            }
        }
    }

    /// Remove a line item from the created document.
    ///
    /// Without a created document this is a silent no-op. On success the
    /// local list becomes the server's returned remainder; there is no
    /// optimistic removal.
    pub async fn remove_line_item(&mut self, item_id: &str) -> Result<(), WorkflowError> {
        let Some((document_id, seq)) = self.state.begin_remove()? else {
            return Ok(());
        };

        match self.client.remove_item(&document_id, item_id).await {
            Ok(items) => {
                self.state.apply_items(seq, items);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    document_id = %document_id,
                    item_id = %item_id,
                    error = %e,
                    "remove line item failed"
                );
                self.state.mutation_failed(seq);
                Err(e.into())
            }
        }
    }

    /// Totals over the current server-confirmed item list.
    pub fn compute_totals(&self) -> Totals {
        self.state.totals()
    }
}
