use airwatch_core::{
    Result, compose_message, config::TelstraConfig, logging::Logger, reading::SiteReading,
    should_alert,
};
use airwatch_telstra::MessagingClient;
use serde_json::Value;

/// Evaluates every health advice in provider order and sends one SMS per match.
///
/// Returns how many alerts were sent. The first failing call aborts the loop.
pub async fn process_alerts_for_reading(
    messaging: &MessagingClient,
    logger: &Logger,
    reading: &SiteReading,
    threshold: f64,
    telstra: &TelstraConfig,
) -> Result<usize> {
    let mut sent = 0usize;

    for advice in &reading.site_health_advices {
        let message = compose_message(&reading.site_name, advice);
        let advice_logger = logger
            .clone()
            .site(reading.site_name.trim())
            .parameter(advice.health_parameter.trim())
            .value(advice.average_value)
            .threshold(threshold);
        advice_logger.info(
            "epa.site.info",
            &format!("EPA AirWatch API site info: {message}"),
        );

        if !should_alert(advice, threshold) {
            continue;
        }

        let response = send_alert(messaging, telstra, &message).await?;
        advice_logger.info(
            "telstra.sms.sent",
            &format!("Telstra Messaging API sms: {response}"),
        );
        sent += 1;
    }

    Ok(sent)
}

async fn send_alert(
    messaging: &MessagingClient,
    telstra: &TelstraConfig,
    message: &str,
) -> Result<Value> {
    let token = messaging
        .get_access_token(&telstra.client_key, &telstra.client_secret)
        .await?;
    let from_number = messaging.get_from_number(&token).await?;
    messaging
        .send_sms(&token, &from_number, &telstra.recipients, message)
        .await
}
