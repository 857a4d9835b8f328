pub mod billing_client;
pub mod metrics;

pub use billing_client::{ApiError, BillingApi, HttpBillingClient};
