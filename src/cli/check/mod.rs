//! Check command - run one birthday scan immediately

use tracing::info;

use crate::api::state::ScanServiceTrait;
use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Run a single scan and print the outcome as JSON
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    info!("Manual birthday check requested");

    let state = crate::create_app_state(&config).await?;
    let outcome = state.scan_service.run_scan().await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
