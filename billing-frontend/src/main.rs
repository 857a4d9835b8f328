use std::sync::Arc;

use billing_core::observability::init_tracing;
use billing_frontend::config::get_configuration;
use billing_frontend::services::HttpBillingClient;
use billing_frontend::startup::build_router;
use billing_frontend::AppState;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("billing-frontend", &configuration.server.log_level);

    billing_frontend::services::metrics::init_metrics();

    let billing_client = Arc::new(HttpBillingClient::new(configuration.billing_api.clone()));
    info!(
        billing_api = %billing_client.base_url(),
        "billing API client ready"
    );

    let app = build_router(AppState::new(billing_client));

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting billing-frontend on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
