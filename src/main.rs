//! Binary entry point: loads configuration and serves the Tax Calculator API.

use tax_calculator::api::{AppState, create_router};
use tax_calculator::config::ConfigLoader;

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "TAX_CALCULATOR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config/app.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)
        .and_then(ConfigLoader::with_env_overrides)
        .map_err(|e| {
            tracing::error!(path = %config_path, "Configuration failed: {e}");
            e
        })?;

    let addr = config.server().bind_address();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Tax Calculator API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
