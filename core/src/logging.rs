use tracing::{error, info};

pub const TARGET: &str = "airwatch";

/// Structured log handle passed to every component.
///
/// `name` identifies the component (`check_air_quality`, `telstra`, ...); the
/// remaining fields are optional context filled in through the builder.
#[derive(Clone, Debug)]
pub struct Logger {
    name: &'static str,
    site: Option<String>,
    parameter: Option<String>,
    value: Option<f64>,
    threshold: Option<f64>,
    status: Option<u16>,
    endpoint: Option<&'static str>,
}

impl Logger {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            site: None,
            parameter: None,
            value: None,
            threshold: None,
            status: None,
            endpoint: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn endpoint(mut self, endpoint: &'static str) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn info(&self, event: &'static str, message: &str) {
        info!(
            target: TARGET,
            logger = self.name,
            event,
            site = self.site.as_deref(),
            parameter = self.parameter.as_deref(),
            value = self.value,
            threshold = self.threshold,
            status = self.status,
            endpoint = self.endpoint,
            "{}",
            message
        );
    }

    pub fn error<E: std::fmt::Debug>(&self, event: &'static str, err: &E, message: &str) {
        error!(
            target: TARGET,
            logger = self.name,
            event,
            site = self.site.as_deref(),
            parameter = self.parameter.as_deref(),
            value = self.value,
            threshold = self.threshold,
            status = self.status,
            endpoint = self.endpoint,
            error = ?err,
            "{}",
            message
        );
    }
}
