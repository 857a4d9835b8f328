//! Thin view helpers: list filtering and display formatting.
//!
//! Pure functions over already-fetched data; every displayed row is a
//! deterministic function of the last successful fetch.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::BillingDocument;

/// Case-insensitive substring filter across customer name, document number,
/// and billing type. An empty query keeps every document.
pub fn filter_documents<'a>(
    documents: &'a [BillingDocument],
    query: &str,
) -> Vec<&'a BillingDocument> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return documents.iter().collect();
    }

    documents
        .iter()
        .filter(|doc| {
            doc.customer_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
                || doc.document_number.to_lowercase().contains(&needle)
                || doc.billing_type.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Format an amount as USD for display, e.g. `$1,234.50`.
///
/// Display formatting is the only client-side numeric work allowed; the
/// amounts themselves always come from the server.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{:0<2}", f)),
        None => (text, "00".to_string()),
    };

    let mut grouped = String::new();
    for (pos, ch) in int_part.chars().enumerate() {
        if pos > 0 && (int_part.len() - pos) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}
