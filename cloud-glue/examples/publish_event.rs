//! Example: Publish a JSON payload to a Pub/Sub topic, the way one function
//! hands work to the next one in a pipeline.
//!
//! # Prerequisites
//!
//! 1. Set `GOOGLE_APPLICATION_CREDENTIALS` environment variable
//! 2. Replace the project and topic below with real ones
//!
//! # Usage
//!
//! ```bash
//! export GOOGLE_APPLICATION_CREDENTIALS="/path/to/service-account-key.json"
//! cargo run --example publish_event
//! ```

use cloud_glue::{CloudGlue, TopicName};
use serde::Serialize;

#[derive(Serialize)]
struct ReportRequest {
    action: String,
    day: String,
}

#[tokio::main]
async fn main() -> Result<(), cloud_glue::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let glue = CloudGlue::connect().await?;

    // Replace with your actual project and topic
    let topic = TopicName::new("my-project", "daily-report");
    let payload = ReportRequest { action: "generate".to_string(), day: "2024-01-15".to_string() };

    tracing::info!(topic = %topic, "Publishing report request");
    glue.publish_json(&payload, &topic).await?;

    tracing::info!("✓ Message published!");
    Ok(())
}
