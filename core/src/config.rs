use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "AIRWATCH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "check_air_quality.config.json";
pub const DEFAULT_TELSTRA_API_URL: &str = "https://tapi.telstra.com/v2";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub epa: EpaConfig,
    pub telstra: TelstraConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpaConfig {
    pub api_key: String,
    /// Site ids are appended verbatim, so this usually ends with `/sites/`.
    pub api_url: String,
    pub site: String,
    pub sites: HashMap<String, String>,
    pub threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelstraConfig {
    pub client_key: String,
    pub client_secret: String,
    pub recipients: Vec<String>,
    #[serde(default = "default_telstra_api_url")]
    pub api_url: String,
}

fn default_telstra_api_url() -> String {
    DEFAULT_TELSTRA_API_URL.to_string()
}

impl Config {
    /// Loads the file named by `AIRWATCH_CONFIG`, or `check_air_quality.config.json`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&raw).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(raw).map_err(|e| Error::config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.epa.api_url.trim().is_empty() {
            return Err(Error::config("epa.api_url is empty"));
        }
        if !self.epa.threshold.is_finite() {
            return Err(Error::config("epa.threshold must be a finite number"));
        }
        self.epa.site_id()?;
        if self.telstra.recipients.is_empty() {
            return Err(Error::config("telstra.recipients is empty"));
        }
        if self.telstra.api_url.trim().is_empty() {
            return Err(Error::config("telstra.api_url is empty"));
        }
        Ok(())
    }
}

impl EpaConfig {
    /// Resolves the configured site name through the `sites` map.
    pub fn site_id(&self) -> Result<&str> {
        self.sites
            .get(&self.site)
            .map(String::as_str)
            .ok_or_else(|| Error::config(format!("site '{}' not found in epa.sites", self.site)))
    }
}
