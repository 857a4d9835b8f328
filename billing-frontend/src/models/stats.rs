//! Dashboard statistics wire type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate counts for the dashboard, computed server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_documents: i64,
    pub status_counts: HashMap<String, i64>,
    pub type_counts: HashMap<String, i64>,
    pub total_amount: Decimal,
}
