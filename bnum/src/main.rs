//! Registers the configured recipients with the messaging free trial.
//!
//! Run once per trial account, before the first alert: the free tier only
//! delivers to numbers on this list (at most five).

use airwatch_core::{config::Config, logging::Logger};
use airwatch_telstra::MessagingClient;
use anyhow::{Context, Result, bail};
use reqwest::Client as HTTPClient;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

const LOGGER_NAME: &str = "register_bnum";
const MAX_TRIAL_RECIPIENTS: usize = 5;

async fn register(http_client: &HTTPClient, config: &Config, logger: &Logger) -> Result<Value> {
    let recipients = &config.telstra.recipients;
    if recipients.len() > MAX_TRIAL_RECIPIENTS {
        bail!(
            "the free trial accepts at most {MAX_TRIAL_RECIPIENTS} recipients, {} configured",
            recipients.len()
        );
    }

    let messaging = MessagingClient::new(
        http_client.clone(),
        config.telstra.api_url.as_str(),
        logger.clone(),
    );
    let token = messaging
        .get_access_token(&config.telstra.client_key, &config.telstra.client_secret)
        .await
        .context("get_access_token")?;
    let response = messaging
        .register_recipients(&token, recipients)
        .await
        .context("register_recipients")?;
    Ok(response)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let logger = Logger::new(LOGGER_NAME);
    let config = Config::from_env().context("load configuration")?;
    let http_client = HTTPClient::builder().build()?;

    let response = register(&http_client, &config, &logger)
        .await
        .inspect_err(|e| logger.error("bnum.failed", e, "Recipient registration failed"))?;
    logger.info(
        "bnum.registered",
        &format!("Telstra Messaging API bnum: {response}"),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer, recipients: &[&str]) -> Config {
        let raw = json!({
            "epa": {
                "api_key": "epa-key",
                "api_url": "https://gateway.api.epa.vic.gov.au/environmentMonitoring/v1/sites/",
                "site": "Footscray",
                "sites": {"Footscray": "site-2"},
                "threshold": 25
            },
            "telstra": {
                "client_key": "key",
                "client_secret": "secret",
                "recipients": recipients,
                "api_url": server.uri()
            }
        });
        Config::from_json(&raw.to_string()).unwrap()
    }

    #[tokio::test]
    async fn register_posts_configured_recipients() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-123"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/messages/freetrial/bnum"))
            .and(body_json(json!({"bnum": ["+61400000000"]})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"bnum": ["+61400000000"]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = register(
            &HTTPClient::new(),
            &config(&server, &["+61400000000"]),
            &Logger::new(LOGGER_NAME),
        )
        .await
        .unwrap();
        assert_eq!(response["bnum"][0], "+61400000000");
    }

    #[tokio::test]
    async fn register_rejects_too_many_recipients() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let recipients = ["+61400000001"; 6];
        let err = register(
            &HTTPClient::new(),
            &config(&server, &recipients),
            &Logger::new(LOGGER_NAME),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("at most 5"));
    }
}
