//! Client for the Telstra Messaging API v2.
//!
//! Every call logs its HTTP status through the injected [`Logger`] and hands
//! the decoded body back to the caller. Tokens are never cached: callers pass
//! them explicitly to each request.

use airwatch_core::{Error, Result, USER_AGENT, logging::Logger, normalize_solidus, parse_json};
use reqwest::{Client as HTTPClient, RequestBuilder, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const TOKEN_PATH: &str = "/oauth/token";
const SUBSCRIPTIONS_PATH: &str = "/messages/provisioning/subscriptions";
const SMS_PATH: &str = "/messages/sms";
const BNUM_PATH: &str = "/messages/freetrial/bnum";
const SMS_SCOPE: &str = "NSMS";
const SUBSCRIPTION_ACTIVE_DAYS: u32 = 30;
const SMS_VALIDITY: u32 = 5;

/// Short-lived bearer token for the messaging API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionResponse {
    destination_address: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionRequest {
    active_days: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SmsRequest<'a> {
    to: &'a [String],
    from: &'a str,
    body: &'a str,
    validity: u32,
    scheduled_delivery: u32,
    reply_request: bool,
    priority: bool,
}

#[derive(Serialize)]
struct BnumRequest<'a> {
    bnum: &'a [String],
}

pub struct MessagingClient {
    http_client: HTTPClient,
    base_url: String,
    logger: Logger,
}

impl MessagingClient {
    pub fn new(http_client: HTTPClient, base_url: impl Into<String>, logger: Logger) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
            logger,
        }
    }

    /// OAuth2 client-credentials exchange for the SMS product scope.
    pub async fn get_access_token(
        &self,
        client_key: &str,
        client_secret: &str,
    ) -> Result<AccessToken> {
        let request = self.request(TOKEN_PATH).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_key),
            ("client_secret", client_secret),
            ("scope", SMS_SCOPE),
        ]);
        let (status, body) = self
            .execute(request, "oauth/token", "telstra.token.status")
            .await?;

        if !status.is_success() {
            return Err(Error::auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let response: TokenResponse = parse_json("telstra token response", &body)?;
        response
            .access_token
            .filter(|token| !token.is_empty())
            .map(AccessToken)
            .ok_or_else(|| Error::auth("token response has no access_token"))
    }

    /// Provisions (or renews) the subscription and returns its sending number.
    pub async fn get_from_number(&self, token: &AccessToken) -> Result<String> {
        let payload = SubscriptionRequest {
            active_days: SUBSCRIPTION_ACTIVE_DAYS,
        };
        let request = self.authorized(SUBSCRIPTIONS_PATH, token).json(&payload);
        let (_, body) = self
            .execute(
                request,
                "messages/provisioning/subscriptions",
                "telstra.from.status",
            )
            .await?;

        let response: SubscriptionResponse = parse_json("telstra subscription response", &body)?;
        Ok(response.destination_address)
    }

    pub async fn send_sms(
        &self,
        token: &AccessToken,
        from_number: &str,
        recipients: &[String],
        message: &str,
    ) -> Result<Value> {
        let payload = SmsRequest {
            to: recipients,
            from: from_number,
            body: message,
            validity: SMS_VALIDITY,
            scheduled_delivery: 1,
            reply_request: false,
            priority: true,
        };
        let request = self
            .authorized(SMS_PATH, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(sms_body(&payload)?);
        let (_, body) = self
            .execute(request, "messages/sms", "telstra.sms.status")
            .await?;

        parse_json("telstra sms response", &body)
    }

    /// Registers up to five trial recipients (free tier "bnum" list).
    pub async fn register_recipients(
        &self,
        token: &AccessToken,
        recipients: &[String],
    ) -> Result<Value> {
        let payload = BnumRequest { bnum: recipients };
        let request = self.authorized(BNUM_PATH, token).json(&payload);
        let (_, body) = self
            .execute(request, "messages/freetrial/bnum", "telstra.bnum.status")
            .await?;

        parse_json("telstra bnum response", &body)
    }

    fn request(&self, path: &str) -> RequestBuilder {
        self.http_client
            .post(format!("{}{path}", self.base_url))
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT)
    }

    fn authorized(&self, path: &str, token: &AccessToken) -> RequestBuilder {
        self.request(path)
            .bearer_auth(token.as_str())
            .header(header::CACHE_CONTROL, "no-cache")
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &'static str,
        event: &'static str,
    ) -> Result<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        self.logger
            .clone()
            .endpoint(endpoint)
            .status(status.as_u16())
            .info(event, &format!("Telstra Messaging API {endpoint}: HTTP {status}"));
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn sms_body(payload: &SmsRequest<'_>) -> Result<String> {
    let json = serde_json::to_string(payload).map_err(|e| Error::parse("telstra sms request", e))?;
    Ok(normalize_solidus(&json))
}
