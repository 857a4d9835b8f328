//! Line item wire types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line item classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Product,
    Service,
    Discount,
    Tax,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Product => "Product",
            ItemCategory::Service => "Service",
            ItemCategory::Discount => "Discount",
            ItemCategory::Tax => "Tax",
        }
    }
}

/// A line item as returned by the API.
///
/// `total_price` and `tax_amount` are computed server-side and trusted
/// verbatim; the front end never recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingItem {
    pub id: String,
    pub item_name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
}

/// Input fields for adding a line item to a document.
///
/// Deserializes leniently so a partially filled entry form round-trips;
/// the missing fields take the same defaults the form starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemInput {
    pub item_name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub tax_rate: Decimal,
}

impl Default for LineItemInput {
    fn default() -> Self {
        Self {
            item_name: String::new(),
            description: None,
            category: ItemCategory::Product,
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
        }
    }
}
