use airwatch_core::{config::Config, logging::Logger};
use airwatch_telstra::MessagingClient;
use anyhow::{Context, Result};
use reqwest::Client as HTTPClient;
use serde::Serialize;
use tracing::instrument;
use tracing_subscriber::EnvFilter;

mod alerts;
mod epa;

const LOGGER_NAME: &str = "check_air_quality";

#[derive(Debug, Serialize)]
struct RunSummary {
    site: String,
    entries: usize,
    alerts_sent: usize,
}

#[instrument(skip_all, fields(site = %config.epa.site))]
async fn run(http_client: &HTTPClient, config: &Config, logger: &Logger) -> Result<RunSummary> {
    let site_id = config.epa.site_id()?;
    logger.clone().site(&config.epa.site).info(
        "epa.site.name",
        &format!("EPA AirWatch API site name: {}", config.epa.site),
    );

    let reading = epa::fetch_site_reading(
        http_client,
        logger,
        &config.epa.api_key,
        &config.epa.api_url,
        site_id,
    )
    .await
    .context("fetch_site_reading")?;
    logger.clone().site(reading.site_name.trim()).info(
        "epa.site.reading",
        &format!(
            "EPA AirWatch API returned {} health advices",
            reading.site_health_advices.len()
        ),
    );

    let messaging = MessagingClient::new(
        http_client.clone(),
        config.telstra.api_url.as_str(),
        logger.clone(),
    );
    let alerts_sent = alerts::process_alerts_for_reading(
        &messaging,
        logger,
        &reading,
        config.epa.threshold,
        &config.telstra,
    )
    .await
    .context("process_alerts_for_reading")?;

    Ok(RunSummary {
        site: reading.site_name.trim().to_string(),
        entries: reading.site_health_advices.len(),
        alerts_sent,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let logger = Logger::new(LOGGER_NAME);
    let config = Config::from_env().context("load configuration")?;
    let http_client = HTTPClient::builder().build()?;

    let summary = run(&http_client, &config, &logger)
        .await
        .inspect_err(|e| logger.error("run.failed", e, "Air quality check failed"))?;
    logger.info("run.completed", &serde_json::to_string(&summary)?);
    Ok(())
}
