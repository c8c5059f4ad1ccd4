use serde::{Deserialize, Serialize};

/// Current readings for one monitoring site, as returned by AirWatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReading {
    pub site_name: String,
    pub site_health_advices: Vec<HealthAdvice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAdvice {
    pub health_parameter: String,
    pub average_value: f64,
    pub unit: String,
    pub health_advice: String,
}
