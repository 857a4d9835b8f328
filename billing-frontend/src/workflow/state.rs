//! Pure draft state and its transitions.
//!
//! All workflow bookkeeping lives here so every transition can be tested
//! without a network or a view layer. The async driver in the parent module
//! is the only caller of the mutation transitions.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BillingDocument, BillingItem, DocumentDraft, LineItemInput};

use super::WorkflowError;

/// Where a draft sits in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftPhase {
    /// Document-level fields are still editable; nothing exists server-side.
    Uncreated,
    /// The server has confirmed creation; only item mutations remain.
    Created { document_id: String },
}

/// Running totals over the current item list.
///
/// Derived on demand, never cached, never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub total_tax: Decimal,
    pub total_amount: Decimal,
}

/// The complete state of one in-progress billing document.
///
/// `items` is server truth: it is only ever replaced wholesale with the list
/// returned by the most recent add/remove response, never patched locally.
#[derive(Debug, Clone)]
pub struct DraftState {
    pub draft: DocumentDraft,
    pub pending_item: LineItemInput,
    phase: DraftPhase,
    items: Vec<BillingItem>,
    submitting: bool,
    mutation_in_flight: bool,
    issued_seq: u64,
}

impl Default for DraftState {
    fn default() -> Self {
        Self::new(DocumentDraft::default())
    }
}

impl DraftState {
    pub fn new(draft: DocumentDraft) -> Self {
        Self {
            draft,
            pending_item: LineItemInput::default(),
            phase: DraftPhase::Uncreated,
            items: Vec::new(),
            submitting: false,
            mutation_in_flight: false,
            issued_seq: 0,
        }
    }

    pub fn phase(&self) -> &DraftPhase {
        &self.phase
    }

    pub fn document_id(&self) -> Option<&str> {
        match &self.phase {
            DraftPhase::Uncreated => None,
            DraftPhase::Created { document_id } => Some(document_id),
        }
    }

    pub fn items(&self) -> &[BillingItem] {
        &self.items
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Phase name for status reporting: distinguishes an empty created
    /// document from one that has items.
    pub fn phase_name(&self) -> &'static str {
        match &self.phase {
            DraftPhase::Uncreated => "uncreated",
            DraftPhase::Created { .. } if self.items.is_empty() => "created_empty",
            DraftPhase::Created { .. } => "created_with_items",
        }
    }

    /// Replace the document-level fields. Rejected once the document exists
    /// server-side: there is no document-level edit after creation.
    pub fn update_draft(&mut self, draft: DocumentDraft) -> Result<(), WorkflowError> {
        if self.document_id().is_some() {
            return Err(WorkflowError::AlreadyCreated);
        }
        self.draft = draft;
        Ok(())
    }

    /// Guard and enter the create request. At most one create is ever in
    /// flight, and a second create is refused outright once one succeeded.
    pub fn begin_submit(&mut self) -> Result<(), WorkflowError> {
        if self.document_id().is_some() {
            return Err(WorkflowError::AlreadyCreated);
        }
        if self.submitting {
            return Err(WorkflowError::SubmitInFlight);
        }
        self.submitting = true;
        Ok(())
    }

    /// Record a confirmed creation. The draft becomes immutable and item
    /// entry opens up.
    pub fn created(&mut self, document: &BillingDocument) {
        self.submitting = false;
        self.items = document.items.clone();
        self.phase = DraftPhase::Created {
            document_id: document.id.clone(),
        };
    }

    /// Creation failed; the draft stays editable and may be resubmitted.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    /// Local validation for a line item candidate. Violations never reach
    /// the network.
    pub fn validate_item(candidate: &LineItemInput) -> Result<(), WorkflowError> {
        if candidate.item_name.trim().is_empty() {
            return Err(WorkflowError::InvalidItem(
                "item name must not be empty".to_string(),
            ));
        }
        if candidate.unit_price <= Decimal::ZERO {
            return Err(WorkflowError::InvalidItem(
                "unit price must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Guard and enter an add mutation. Returns the target document id and
    /// the sequence number identifying this mutation.
    pub fn begin_add(&mut self, candidate: &LineItemInput) -> Result<(String, u64), WorkflowError> {
        let document_id = self
            .document_id()
            .ok_or(WorkflowError::NotCreated)?
            .to_string();
        Self::validate_item(candidate)?;
        if self.mutation_in_flight {
            return Err(WorkflowError::MutationInFlight);
        }
        self.mutation_in_flight = true;
        self.issued_seq += 1;
        self.pending_item = candidate.clone();
        Ok((document_id, self.issued_seq))
    }

    /// Guard and enter a remove mutation. Without a created document this is
    /// a no-op by design, signalled as `None`.
    pub fn begin_remove(&mut self) -> Result<Option<(String, u64)>, WorkflowError> {
        let Some(document_id) = self.document_id().map(str::to_string) else {
            return Ok(None);
        };
        if self.mutation_in_flight {
            return Err(WorkflowError::MutationInFlight);
        }
        self.mutation_in_flight = true;
        self.issued_seq += 1;
        Ok(Some((document_id, self.issued_seq)))
    }

    /// Apply a successful mutation response: replace the item list wholesale
    /// with the server's. A response is applied only if it belongs to the
    /// most recently issued mutation; anything older is discarded so a late
    /// arrival cannot clobber a newer confirmed list. Returns whether the
    /// response was applied.
    pub fn apply_items(&mut self, seq: u64, items: Vec<BillingItem>) -> bool {
        if seq != self.issued_seq {
            tracing::warn!(seq, latest = self.issued_seq, "discarding stale item response");
            return false;
        }
        self.mutation_in_flight = false;
        self.items = items;
        true
    }

    /// A mutation failed; local items stay untouched.
    pub fn mutation_failed(&mut self, seq: u64) {
        if seq == self.issued_seq {
            self.mutation_in_flight = false;
        }
    }

    /// Reset the pending item input to defaults after a successful add.
    pub fn clear_pending_item(&mut self) {
        self.pending_item = LineItemInput::default();
    }

    /// Totals over the current server-confirmed items. Pure; the server's
    /// per-item figures are summed, never recomputed from quantity/price.
    pub fn totals(&self) -> Totals {
        let subtotal: Decimal = self.items.iter().map(|i| i.total_price).sum();
        let total_tax: Decimal = self.items.iter().map(|i| i.tax_amount).sum();
        Totals {
            subtotal,
            total_tax,
            total_amount: subtotal + total_tax,
        }
    }
}
