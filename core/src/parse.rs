use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Decodes a response body, tagging failures with what was being read.
pub fn parse_json<T: DeserializeOwned>(context: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::parse(context, e))
}

/// Rewrites every escaped solidus (`\/`) in serialized JSON to a literal `/`.
///
/// Escaped backslashes are copied through untouched, so `\\/` (a backslash
/// followed by a slash) keeps its meaning.
pub fn normalize_solidus(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
