//! HTTP client for the class management backend.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::types::{
    ClassEntry, ClassListResponse, ParamMap, RosterEntry, RosterResponse, SendRequest,
    SendResponse,
};
use crate::{token_prefix, SUCCESS_STATUS};

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
    #[serde(default)]
    access_token: Option<String>,
}

/// Client for the class management backend.
#[derive(Clone)]
pub struct GatewayClient {
    http: Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Build a client for the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { http, config })
    }

    /// Exchange the application identity for a fresh access token.
    ///
    /// Transport failures are retried up to `token_attempts` times with no
    /// delay in between. A response that arrives, whatever its content, is
    /// never retried. The token is not cached.
    pub async fn acquire_token(&self) -> Result<String, GatewayError> {
        let url = self.config.token_url();
        let query = [("appId", ""), ("appVersion", ""), ("accessToken", "")];
        let headers = header_map(&self.config.backend_headers())?;
        let attempts = self.config.token_attempts.max(1);

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            debug!(attempt, "Requesting access token");

            let result = self
                .http
                .get(&url)
                .query(&query)
                .headers(headers.clone())
                .send()
                .await
                .map_err(GatewayError::Http);

            match result {
                Ok(resp) => break resp,
                Err(e) if e.is_transport() && attempt < attempts => {
                    warn!(attempt, error = %e, "Token request failed, retrying");
                }
                Err(e) => return Err(e),
            }
        };

        let body: TokenResponse = decode(response).await?;
        let token = body
            .data
            .and_then(|d| d.access_token)
            .filter(|t| !t.is_empty())
            .ok_or(GatewayError::MissingField("accessToken"))?;

        debug!(token = %token_prefix(&token), "Access token acquired");
        Ok(token)
    }

    /// Fetch one page of the class listing.
    ///
    /// `query` must already contain the page cursor and access token.
    pub async fn list_classes(
        &self,
        query: &ParamMap,
        headers: &ParamMap,
    ) -> Result<Vec<ClassEntry>, GatewayError> {
        let url = self.config.class_list_url();
        debug!(page = ?query.get("pageNo"), "Listing classes");

        let response = self
            .http
            .get(&url)
            .query(query)
            .headers(header_map(headers)?)
            .send()
            .await?;

        let body: ClassListResponse = decode(response).await?;
        body.data
            .and_then(|d| d.class_list)
            .ok_or(GatewayError::MissingField("classList"))
    }

    /// Fetch the roster of a single class.
    ///
    /// `timeout` bounds this request independently of the client default.
    pub async fn student_list(
        &self,
        query: &ParamMap,
        headers: &ParamMap,
        timeout: Duration,
    ) -> Result<Vec<RosterEntry>, GatewayError> {
        let url = self.config.roster_url();
        debug!(class_code = ?query.get("classCode"), "Fetching roster");

        let response = self
            .http
            .get(&url)
            .query(query)
            .headers(header_map(headers)?)
            .timeout(timeout)
            .send()
            .await?;

        let body: RosterResponse = decode(response).await?;
        let status = body.status.unwrap_or_default();
        if status != SUCCESS_STATUS {
            return Err(GatewayError::Status {
                status,
                message: body.message.unwrap_or_default(),
            });
        }

        body.data
            .ok_or(GatewayError::MissingField("data"))?
            .student_list
            .ok_or(GatewayError::MissingField("studentList"))
    }

    /// Post a broadcast message. The caller inspects the returned status.
    pub async fn send_message(
        &self,
        request: &SendRequest,
        headers: &ParamMap,
    ) -> Result<SendResponse, GatewayError> {
        let url = self.config.send_url();
        debug!(
            recipients = request.student_list.len(),
            "Posting broadcast message"
        );

        let response = self
            .http
            .post(&url)
            .headers(header_map(headers)?)
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    /// Get the configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Decode a JSON body regardless of HTTP status; the backend reports
/// failures in the body.
async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        debug!(http_status = %status, "Undecodable response body");
        GatewayError::Json(e)
    })
}

/// Convert a header table into a `HeaderMap`. Empty values and `Host` are skipped.
fn header_map(headers: &ParamMap) -> Result<HeaderMap, GatewayError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        if value.is_empty() || name.eq_ignore_ascii_case("host") {
            continue;
        }
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| GatewayError::Config(format!("invalid header name: {name}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| GatewayError::Config(format!("invalid value for header {name}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_map_skips_empty_and_host() {
        let headers = ParamMap::from([
            ("Host".to_string(), "example.com".to_string()),
            ("stafftoken".to_string(), String::new()),
            ("accept".to_string(), "application/json".to_string()),
        ]);
        let map = header_map(&headers).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn header_map_rejects_bad_names() {
        let headers = ParamMap::from([("bad header".to_string(), "x".to_string())]);
        assert!(matches!(header_map(&headers), Err(GatewayError::Config(_))));
    }
}
