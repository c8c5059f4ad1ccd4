pub mod config;
mod error;
mod parse;
pub mod evaluate;
pub mod logging;
pub mod reading;
pub use error::{Error, Result};
pub use evaluate::{compose_message, should_alert};
pub use parse::{normalize_solidus, parse_json};

/// The only health parameter that can trigger an alert.
pub const ALERT_PARAMETER: &str = "PM2.5";
/// Both providers sit behind gateways that expect a curl user agent.
pub const USER_AGENT: &str = "curl/7.58.0";
