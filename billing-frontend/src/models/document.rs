//! Billing document wire types.
//!
//! Field names and enum strings match the billing API's JSON verbatim; the
//! front end never re-derives anything the server already computed.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::BillingItem;

/// Document classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingType {
    #[serde(rename = "Advance invoice BR")]
    AdvanceInvoice,
    #[serde(rename = "Standard invoice")]
    StandardInvoice,
    #[serde(rename = "Receipt")]
    Receipt,
    #[serde(rename = "Credit note")]
    CreditNote,
    #[serde(rename = "Proforma invoice")]
    ProformaInvoice,
}

impl BillingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::AdvanceInvoice => "Advance invoice BR",
            BillingType::StandardInvoice => "Standard invoice",
            BillingType::Receipt => "Receipt",
            BillingType::CreditNote => "Credit note",
            BillingType::ProformaInvoice => "Proforma invoice",
        }
    }
}

/// Document lifecycle status, assigned server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Draft,
    Pending,
    Processed,
    Completed,
    Cancelled,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Draft",
            DocumentStatus::Pending => "Pending",
            DocumentStatus::Processed => "Processed",
            DocumentStatus::Completed => "Completed",
            DocumentStatus::Cancelled => "Cancelled",
        }
    }
}

/// A billing document as returned by the API, totals included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingDocument {
    pub id: String,
    pub document_number: String,
    pub billing_type: BillingType,
    pub billing_date: NaiveDate,
    pub pricing_date: Option<NaiveDate>,
    pub service_rendered_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    #[serde(default)]
    pub items: Vec<BillingItem>,
    pub subtotal: Decimal,
    pub total_tax: Decimal,
    pub total_amount: Decimal,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Document-level fields of a draft under construction.
///
/// This is the create-request body; the server responds with the full
/// [`BillingDocument`], including the assigned id and document number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDraft {
    pub billing_type: BillingType,
    pub billing_date: NaiveDate,
    pub pricing_date: Option<NaiveDate>,
    pub service_rendered_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub notes: Option<String>,
}

impl Default for DocumentDraft {
    fn default() -> Self {
        Self {
            billing_type: BillingType::StandardInvoice,
            billing_date: Utc::now().date_naive(),
            pricing_date: None,
            service_rendered_date: None,
            due_date: None,
            customer_name: None,
            customer_email: None,
            customer_address: None,
            notes: None,
        }
    }
}
