//! HTTP client tests against a spawned fake billing API.
//!
//! The fake reproduces the real backend's routes, JSON shapes, and error
//! bodies (`{"detail": ...}`) so the reqwest client is exercised end to end,
//! including its status-code-to-error mapping.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use billing_frontend::config::BillingApiSettings;
use billing_frontend::models::{
    BillingDocument, BillingItem, DocumentDraft, DocumentStatus, LineItemInput,
};
use billing_frontend::services::{ApiError, BillingApi, HttpBillingClient};

type Documents = Arc<Mutex<Vec<BillingDocument>>>;

fn recompute(document: &mut BillingDocument) {
    document.subtotal = document.items.iter().map(|i| i.total_price).sum();
    document.total_tax = document.items.iter().map(|i| i.tax_amount).sum();
    document.total_amount = document.subtotal + document.total_tax;
    document.updated_at = Utc::now();
}

async fn create_document(
    State(documents): State<Documents>,
    Json(draft): Json<DocumentDraft>,
) -> Json<BillingDocument> {
    let document = BillingDocument {
        id: Uuid::new_v4().to_string(),
        document_number: format!("INV-{}", Utc::now().format("%Y%m%d%H%M%S")),
        billing_type: draft.billing_type,
        billing_date: draft.billing_date,
        pricing_date: draft.pricing_date,
        service_rendered_date: draft.service_rendered_date,
        due_date: draft.due_date,
        customer_name: draft.customer_name,
        customer_email: draft.customer_email,
        customer_address: draft.customer_address,
        items: Vec::new(),
        subtotal: Decimal::ZERO,
        total_tax: Decimal::ZERO,
        total_amount: Decimal::ZERO,
        status: DocumentStatus::Draft,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        notes: draft.notes,
    };

    documents.lock().unwrap().push(document.clone());
    Json(document)
}

async fn list_documents(State(documents): State<Documents>) -> Json<Vec<BillingDocument>> {
    Json(documents.lock().unwrap().clone())
}

async fn dashboard_stats(State(documents): State<Documents>) -> Json<serde_json::Value> {
    let documents = documents.lock().unwrap();
    Json(json!({
        "total_documents": documents.len(),
        "status_counts": {"Draft": documents.len()},
        "type_counts": {},
        "total_amount": documents.iter().map(|d| d.total_amount).sum::<Decimal>(),
    }))
}

async fn add_item(
    State(documents): State<Documents>,
    Path(document_id): Path<String>,
    Json(input): Json<LineItemInput>,
) -> impl IntoResponse {
    if input.quantity <= Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "quantity must be positive"})),
        )
            .into_response();
    }

    let mut documents = documents.lock().unwrap();
    let Some(document) = documents.iter_mut().find(|d| d.id == document_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Document not found"})),
        )
            .into_response();
    };

    let total_price = input.quantity * input.unit_price;
    document.items.push(BillingItem {
        id: Uuid::new_v4().to_string(),
        item_name: input.item_name,
        description: input.description,
        category: input.category,
        quantity: input.quantity,
        unit_price: input.unit_price,
        total_price,
        tax_rate: input.tax_rate,
        tax_amount: total_price * input.tax_rate / Decimal::new(100, 0),
    });
    recompute(document);
    Json(document.clone()).into_response()
}

async fn remove_item(
    State(documents): State<Documents>,
    Path((document_id, item_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let mut documents = documents.lock().unwrap();
    let Some(document) = documents.iter_mut().find(|d| d.id == document_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Document not found"})),
        )
            .into_response();
    };

    let before = document.items.len();
    document.items.retain(|i| i.id != item_id);
    if document.items.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Item not found"})),
        )
            .into_response();
    }

    recompute(document);
    Json(document.clone()).into_response()
}

/// Spawn the fake backend on a random port; returns a client pointed at it.
async fn spawn_backend() -> HttpBillingClient {
    let documents: Documents = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route(
            "/api/billing-documents",
            post(create_document).get(list_documents),
        )
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/billing-documents/:id/items", post(add_item))
        .route(
            "/api/billing-documents/:id/items/:item_id",
            axum::routing::delete(remove_item),
        )
        .with_state(documents);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let address = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend");
    });

    HttpBillingClient::new(BillingApiSettings {
        url: format!("http://{}/api", address),
    })
}

fn widget() -> LineItemInput {
    LineItemInput {
        item_name: "Widget".to_string(),
        quantity: "2".parse().unwrap(),
        unit_price: "10.00".parse().unwrap(),
        tax_rate: "10".parse().unwrap(),
        ..LineItemInput::default()
    }
}

#[tokio::test]
async fn create_assigns_identity_and_document_number() {
    let client = spawn_backend().await;

    let draft = DocumentDraft {
        customer_name: Some("Acme GmbH".to_string()),
        ..DocumentDraft::default()
    };
    let document = client.create_document(&draft).await.expect("create");

    assert!(!document.id.is_empty());
    assert!(document.document_number.starts_with("INV-"));
    assert_eq!(document.status, DocumentStatus::Draft);
    assert!(document.items.is_empty());

    let listed = client.list_documents().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, document.id);
}

#[tokio::test]
async fn item_mutations_return_the_full_updated_list() {
    let client = spawn_backend().await;
    let document = client
        .create_document(&DocumentDraft::default())
        .await
        .expect("create");

    let items = client.add_item(&document.id, &widget()).await.expect("add");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].total_price, "20.00".parse::<Decimal>().unwrap());
    assert_eq!(items[0].tax_amount, "2.000".parse::<Decimal>().unwrap());

    let items = client.add_item(&document.id, &widget()).await.expect("add");
    assert_eq!(items.len(), 2);

    let remainder = client
        .remove_item(&document.id, &items[0].id)
        .await
        .expect("remove");
    assert_eq!(remainder.len(), 1);
    assert_eq!(remainder[0].id, items[1].id);
}

#[tokio::test]
async fn unknown_document_maps_to_not_found() {
    let client = spawn_backend().await;

    let err = client
        .add_item("no-such-document", &widget())
        .await
        .expect_err("404 expected");
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn server_rejection_maps_to_validation_with_detail() {
    let client = spawn_backend().await;
    let document = client
        .create_document(&DocumentDraft::default())
        .await
        .expect("create");

    let bad = LineItemInput {
        quantity: Decimal::ZERO,
        ..widget()
    };
    let err = client
        .add_item(&document.id, &bad)
        .await
        .expect_err("400 expected");
    match err {
        ApiError::Validation { detail } => assert!(detail.contains("quantity")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_backend_maps_to_network_error() {
    // Grab a port that nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpBillingClient::new(BillingApiSettings {
        url: format!("http://{}/api", address),
    });

    let err = client
        .list_documents()
        .await
        .expect_err("connection refused");
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn dashboard_stats_deserialize() {
    let client = spawn_backend().await;
    client
        .create_document(&DocumentDraft::default())
        .await
        .expect("create");

    let stats = client.dashboard_stats().await.expect("stats");
    assert_eq!(stats.total_documents, 1);
    assert_eq!(stats.status_counts.get("Draft"), Some(&1));
}
