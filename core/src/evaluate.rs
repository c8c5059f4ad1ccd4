use crate::ALERT_PARAMETER;
use crate::reading::HealthAdvice;

/// True when the entry is PM2.5 and strictly above `threshold`.
///
/// The parameter comparison is exact: no trimming, no case folding.
pub fn should_alert(entry: &HealthAdvice, threshold: f64) -> bool {
    entry.average_value > threshold && entry.health_parameter == ALERT_PARAMETER
}

/// Builds the alert text: site, advice, value, unit and parameter, space separated.
pub fn compose_message(site_name: &str, entry: &HealthAdvice) -> String {
    format!(
        "{} {} {} {} {}",
        site_name.trim(),
        entry.health_advice.trim(),
        entry.average_value,
        html_escape::decode_html_entities(entry.unit.trim()),
        entry.health_parameter.trim()
    )
}
