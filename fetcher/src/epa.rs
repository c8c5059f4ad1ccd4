use airwatch_core::{Result, USER_AGENT, logging::Logger, parse_json, reading::SiteReading};
use reqwest::{Client as HTTPClient, header};

const API_KEY_HEADER: &str = "X-API-Key";

/// Fetches the current readings of one AirWatch site.
///
/// The status code is only logged: whatever body comes back is decoded, so a
/// non-JSON error page surfaces as a parse error.
pub async fn fetch_site_reading(
    http_client: &HTTPClient,
    logger: &Logger,
    api_key: &str,
    api_url: &str,
    site_id: &str,
) -> Result<SiteReading> {
    let url = format!("{api_url}{site_id}");
    let response = http_client
        .get(&url)
        .header(header::ACCEPT, "application/json")
        .header(header::USER_AGENT, USER_AGENT)
        .header(API_KEY_HEADER, api_key)
        .send()
        .await?;

    let status = response.status();
    logger
        .clone()
        .endpoint("sites")
        .status(status.as_u16())
        .info(
            "epa.site.status",
            &format!("EPA AirWatch API site status: HTTP {status}"),
        );

    let body = response.text().await?;
    parse_json("epa site reading", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_core::Error;
    use serde_json::json;
    use wiremock::matchers::{header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn logger() -> Logger {
        Logger::new("check_air_quality")
    }

    #[tokio::test]
    async fn fetch_site_reading_sends_key_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1"))
            .and(header_eq("x-api-key", "epa-key"))
            .and(header_eq("accept", "application/json"))
            .and(header_eq("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "siteName": "Melbourne CBD",
                "siteHealthAdvices": [{
                    "healthParameter": "PM2.5",
                    "averageValue": 40,
                    "unit": "&micro;g/m&sup3;",
                    "healthAdvice": "Poor air quality"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api_url = format!("{}/sites/", server.uri());
        let reading = fetch_site_reading(&HTTPClient::new(), &logger(), "epa-key", &api_url, "site-1")
            .await
            .unwrap();
        assert_eq!(reading.site_name, "Melbourne CBD");
        assert_eq!(reading.site_health_advices[0].average_value, 40.0);
    }

    #[tokio::test]
    async fn fetch_site_reading_non_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let api_url = format!("{}/sites/", server.uri());
        let err = fetch_site_reading(&HTTPClient::new(), &logger(), "epa-key", &api_url, "site-1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse { context: "epa site reading", .. }));
    }

    #[tokio::test]
    async fn fetch_site_reading_decodes_body_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "siteName": "Footscray",
                "siteHealthAdvices": []
            })))
            .mount(&server)
            .await;

        let api_url = format!("{}/sites/", server.uri());
        let reading = fetch_site_reading(&HTTPClient::new(), &logger(), "epa-key", &api_url, "site-1")
            .await
            .unwrap();
        assert!(reading.site_health_advices.is_empty());
    }

    #[tokio::test]
    async fn fetch_site_reading_unreachable_is_transport_error() {
        let err = fetch_site_reading(
            &HTTPClient::new(),
            &logger(),
            "epa-key",
            "http://127.0.0.1:9/sites/",
            "site-1",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
