//! HTTP client for the billing API.
//!
//! The API owns persistence, document numbering, and tax computation; this
//! client is a request/response boundary and nothing more. Item mutations
//! respond with the full updated document — the client hands back its `items`
//! list, which callers apply wholesale (server-truth replacement).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::BillingApiSettings;
use crate::models::{BillingDocument, BillingItem, DashboardStats, DocumentDraft, LineItemInput};

/// Failure modes of a billing API call.
///
/// A validation rejection and a transport failure are kept apart so callers
/// can answer with the right status, but neither is retried here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("billing API rejected the request: {detail}")]
    Validation { detail: String },

    #[error("resource not found: {detail}")]
    NotFound { detail: String },

    #[error("billing API unreachable or failed: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Seam between the front end and the billing API.
///
/// The production implementation is [`HttpBillingClient`]; tests substitute
/// their own.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Create a billing document. Not idempotent: every successful call
    /// creates exactly one document server-side.
    async fn create_document(&self, draft: &DocumentDraft) -> Result<BillingDocument, ApiError>;

    async fn list_documents(&self) -> Result<Vec<BillingDocument>, ApiError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    /// Add a line item; returns the document's full item list after the add.
    async fn add_item(
        &self,
        document_id: &str,
        item: &LineItemInput,
    ) -> Result<Vec<BillingItem>, ApiError>;

    /// Remove a line item; returns the document's remaining item list.
    async fn remove_item(
        &self,
        document_id: &str,
        item_id: &str,
    ) -> Result<Vec<BillingItem>, ApiError>;
}

/// `BillingApi` over HTTP/JSON with reqwest.
pub struct HttpBillingClient {
    client: Client,
    settings: BillingApiSettings,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
}

impl HttpBillingClient {
    pub fn new(settings: BillingApiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.settings.url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.url, path)
    }

    /// Map a non-success response to an [`ApiError`], consuming the body.
    async fn error_for(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let detail = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| status.to_string());

        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound { detail },
            s if s.is_client_error() => ApiError::Validation { detail },
            _ => ApiError::Network(detail),
        }
    }
}

#[async_trait]
impl BillingApi for HttpBillingClient {
    async fn create_document(&self, draft: &DocumentDraft) -> Result<BillingDocument, ApiError> {
        let url = self.url("/billing-documents");

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Create document request failed");
                ApiError::from(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(response.json::<BillingDocument>().await?)
    }

    async fn list_documents(&self) -> Result<Vec<BillingDocument>, ApiError> {
        let url = self.url("/billing-documents");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "List documents request failed");
            ApiError::from(e)
        })?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(response.json::<Vec<BillingDocument>>().await?)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let url = self.url("/dashboard/stats");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Dashboard stats request failed");
            ApiError::from(e)
        })?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(response.json::<DashboardStats>().await?)
    }

    async fn add_item(
        &self,
        document_id: &str,
        item: &LineItemInput,
    ) -> Result<Vec<BillingItem>, ApiError> {
        let url = self.url(&format!("/billing-documents/{}/items", document_id));

        let response = self
            .client
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(document_id = %document_id, error = %e, "Add item request failed");
                ApiError::from(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let document = response.json::<BillingDocument>().await?;
        Ok(document.items)
    }

    async fn remove_item(
        &self,
        document_id: &str,
        item_id: &str,
    ) -> Result<Vec<BillingItem>, ApiError> {
        let url = self.url(&format!(
            "/billing-documents/{}/items/{}",
            document_id, item_id
        ));

        let response = self.client.delete(&url).send().await.map_err(|e| {
            tracing::error!(
                document_id = %document_id,
                item_id = %item_id,
                error = %e,
                "Remove item request failed"
            );
            ApiError::from(e)
        })?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let document = response.json::<BillingDocument>().await?;
        Ok(document.items)
    }
}
