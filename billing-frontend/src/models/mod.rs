pub mod document;
pub mod line_item;
pub mod stats;

pub use document::{BillingDocument, BillingType, DocumentDraft, DocumentStatus};
pub use line_item::{BillingItem, ItemCategory, LineItemInput};
pub use stats::DashboardStats;
