pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod views;
pub mod workflow;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use services::BillingApi;
use workflow::DraftWorkflow;

/// Shared application state: the billing API client and the live draft
/// workflow sessions.
///
/// Each session is behind its own async mutex, so one draft's operations run
/// strictly one at a time while separate drafts never contend.
#[derive(Clone)]
pub struct AppState {
    pub billing_client: Arc<dyn BillingApi>,
    pub drafts: Arc<DashMap<Uuid, Arc<Mutex<DraftWorkflow>>>>,
}

impl AppState {
    pub fn new(billing_client: Arc<dyn BillingApi>) -> Self {
        Self {
            billing_client,
            drafts: Arc::new(DashMap::new()),
        }
    }
}
