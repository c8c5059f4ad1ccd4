use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network or connection failure on an HTTP call.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not JSON or does not match the expected schema.
    #[error("failed to parse {context}: {source}")]
    Parse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Token exchange rejected by the messaging provider.
    #[error("authentication failed: {0}")]
    Auth(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn parse(context: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { context, source }
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }
}
