//! Admin interface for teacher outreach.
//!
//! Exposes candidate discovery, message dispatch and teacher parameter
//! management as JSON endpoints.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use class_gateway::{GatewayClient, GatewayConfig};
use database::Database;
use outreach::{OutreachPipeline, PipelineConfig};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting admin web server");

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let gateway = GatewayClient::new(GatewayConfig::new(
        &config.backend_url,
        &config.gateway_url,
    ))?;
    let pipeline_config = PipelineConfig::default()
        .with_course_keyword(&config.course_keyword)
        .with_page_count(config.class_pages);
    let pipeline = OutreachPipeline::new(gateway, pipeline_config, Arc::new(db.clone()));

    let state = AppState::new(db, pipeline);

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!(addr = %config.addr, "Admin web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
