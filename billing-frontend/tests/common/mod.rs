//! Test helpers: an in-memory stand-in for the billing API.
//!
//! The mock reproduces the backend's arithmetic (total = quantity × price,
//! tax = total × rate / 100) and its response shape — every item mutation
//! answers with the document's full item list — so workflow tests exercise
//! the real server-truth-replacement path. Call counters let tests assert
//! that locally rejected operations never reach the network.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use billing_frontend::models::{
    BillingDocument, BillingItem, DashboardStats, DocumentDraft, DocumentStatus, LineItemInput,
};
use billing_frontend::services::{ApiError, BillingApi};

#[derive(Default)]
pub struct MockBillingApi {
    pub create_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
    pub fail_next_create: AtomicBool,
    pub fail_next_add: AtomicBool,
    pub fail_next_remove: AtomicBool,
    documents: Mutex<Vec<BillingDocument>>,
}

impl MockBillingApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn compute_item(input: &LineItemInput) -> BillingItem {
        let total_price = input.quantity * input.unit_price;
        let tax_amount = total_price * input.tax_rate / Decimal::new(100, 0);
        BillingItem {
            id: Uuid::new_v4().to_string(),
            item_name: input.item_name.clone(),
            description: input.description.clone(),
            category: input.category,
            quantity: input.quantity,
            unit_price: input.unit_price,
            total_price,
            tax_rate: input.tax_rate,
            tax_amount,
        }
    }

    fn recompute(document: &mut BillingDocument) {
        document.subtotal = document.items.iter().map(|i| i.total_price).sum();
        document.total_tax = document.items.iter().map(|i| i.tax_amount).sum();
        document.total_amount = document.subtotal + document.total_tax;
        document.updated_at = Utc::now();
    }

    fn network_failure() -> ApiError {
        ApiError::Network("connection reset by peer".to_string())
    }

    /// The server-side item list for a document, for asserting that the
    /// workflow's local list matches it exactly.
    pub fn items_of(&self, document_id: &str) -> Vec<BillingItem> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == document_id)
            .map(|d| d.items.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BillingApi for MockBillingApi {
    async fn create_document(&self, draft: &DocumentDraft) -> Result<BillingDocument, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(Self::network_failure());
        }

        let document = BillingDocument {
            id: Uuid::new_v4().to_string(),
            document_number: format!("DOC-{}", self.create_calls.load(Ordering::SeqCst)),
            billing_type: draft.billing_type,
            billing_date: draft.billing_date,
            pricing_date: draft.pricing_date,
            service_rendered_date: draft.service_rendered_date,
            due_date: draft.due_date,
            customer_name: draft.customer_name.clone(),
            customer_email: draft.customer_email.clone(),
            customer_address: draft.customer_address.clone(),
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            status: DocumentStatus::Draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            notes: draft.notes.clone(),
        };

        self.documents.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn list_documents(&self) -> Result<Vec<BillingDocument>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let documents = self.documents.lock().unwrap();

        let mut status_counts = std::collections::HashMap::new();
        let mut type_counts = std::collections::HashMap::new();
        for doc in documents.iter() {
            *status_counts
                .entry(doc.status.as_str().to_string())
                .or_insert(0) += 1;
            *type_counts
                .entry(doc.billing_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        Ok(DashboardStats {
            total_documents: documents.len() as i64,
            status_counts,
            type_counts,
            total_amount: documents.iter().map(|d| d.total_amount).sum(),
        })
    }

    async fn add_item(
        &self,
        document_id: &str,
        item: &LineItemInput,
    ) -> Result<Vec<BillingItem>, ApiError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_add.swap(false, Ordering::SeqCst) {
            return Err(Self::network_failure());
        }

        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| ApiError::NotFound {
                detail: "Document not found".to_string(),
            })?;

        document.items.push(Self::compute_item(item));
        Self::recompute(document);
        Ok(document.items.clone())
    }

    async fn remove_item(
        &self,
        document_id: &str,
        item_id: &str,
    ) -> Result<Vec<BillingItem>, ApiError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_remove.swap(false, Ordering::SeqCst) {
            return Err(Self::network_failure());
        }

        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| ApiError::NotFound {
                detail: "Document not found".to_string(),
            })?;

        let before = document.items.len();
        document.items.retain(|i| i.id != item_id);
        if document.items.len() == before {
            return Err(ApiError::NotFound {
                detail: "Item not found".to_string(),
            });
        }

        Self::recompute(document);
        Ok(document.items.clone())
    }
}
