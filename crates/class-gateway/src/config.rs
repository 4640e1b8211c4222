//! Configuration types for class-gateway.

use std::time::Duration;

use crate::types::ParamMap;

/// Token exchange path on the backend host.
pub const TOKEN_PATH: &str = "/api/wx/getToken";
/// Class listing path on the gateway host.
pub const CLASS_LIST_PATH: &str = "/k12-assistant-api/api/v1.0/acl/wx/1/class/all/list";
/// Student roster path on the backend host.
pub const ROSTER_PATH: &str = "/api/wx/class/getStudentList";
/// Message send path on the backend host.
pub const SEND_PATH: &str = "/api/wx/sms/send";

/// Application id the desktop client identifies itself with.
pub const DEFAULT_APP_ID: &str = "3027D9E5-0C09-4AD3-86F0-6C678B7826A4";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
    (KHTML, like Gecko) Language/zh ColorScheme/Light DistType/publish-store wxwork/4.1.15 \
    (MicroMessenger/6.2) WeChat/2.0.4 Safari/605.1.15";
const ORIGIN: &str = "https://deskwx.xdf.cn";
const CLASS_LIST_REFERER: &str =
    "https://deskwx.xdf.cn/wechat-work-teacher-ms-web/classSchedule/classList";

/// Configuration for connecting to the class management backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the backend serving token, roster and send
    /// (e.g., "https://wxbackend.xdf.cn").
    pub backend_url: String,
    /// Base URL of the gateway serving the class listing.
    pub gateway_url: String,
    /// Application id sent with every data request.
    pub app_id: String,
    /// How many times token acquisition is attempted on transport failure.
    pub token_attempts: u32,
    /// Default timeout applied to every request.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Create a new configuration with the given backend and gateway URLs.
    pub fn new(backend_url: impl Into<String>, gateway_url: impl Into<String>) -> Self {
        Self {
            backend_url: trim_base(backend_url.into()),
            gateway_url: trim_base(gateway_url.into()),
            app_id: DEFAULT_APP_ID.to_string(),
            token_attempts: 3,
            timeout: Duration::from_secs(30),
        }
    }

    /// Point both hosts at the same base URL (useful against a single mock server).
    pub fn single_host(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self::new(base.clone(), base)
    }

    /// Override the number of token attempts.
    pub fn with_token_attempts(mut self, attempts: u32) -> Self {
        self.token_attempts = attempts.max(1);
        self
    }

    /// Override the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the token endpoint URL.
    pub fn token_url(&self) -> String {
        format!("{}{}", self.backend_url, TOKEN_PATH)
    }

    /// Get the class listing endpoint URL.
    pub fn class_list_url(&self) -> String {
        format!("{}{}", self.gateway_url, CLASS_LIST_PATH)
    }

    /// Get the roster endpoint URL.
    pub fn roster_url(&self) -> String {
        format!("{}{}", self.backend_url, ROSTER_PATH)
    }

    /// Get the send endpoint URL.
    pub fn send_url(&self) -> String {
        format!("{}{}", self.backend_url, SEND_PATH)
    }

    /// Headers sent with token and send requests.
    pub fn backend_headers(&self) -> ParamMap {
        ParamMap::from([
            ("Origin".to_string(), ORIGIN.to_string()),
            ("Accept".to_string(), "application/json, text/plain, */*".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Accept-Language".to_string(), "zh-cn".to_string()),
            ("Referer".to_string(), format!("{ORIGIN}/")),
        ])
    }

    /// Headers sent with class listing requests.
    ///
    /// `stafftoken` is empty by default and is expected to come from the
    /// teacher's gateway parameters.
    pub fn class_list_headers(&self) -> ParamMap {
        ParamMap::from([
            ("stafftoken".to_string(), String::new()),
            ("accept".to_string(), "application/json, text/plain, */*".to_string()),
            ("origin".to_string(), ORIGIN.to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
            ("accept-language".to_string(), "zh-cn".to_string()),
            ("referer".to_string(), CLASS_LIST_REFERER.to_string()),
        ])
    }

    /// Headers sent with roster requests.
    pub fn roster_headers(&self) -> ParamMap {
        ParamMap::from([
            ("accept".to_string(), "application/json, text/plain, */*".to_string()),
            ("origin".to_string(), ORIGIN.to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
            ("accept-language".to_string(), "zh-cn".to_string()),
            ("referer".to_string(), CLASS_LIST_REFERER.to_string()),
        ])
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new("https://wxbackend.xdf.cn", "https://gateway.app.xdf.cn")
    }
}

fn trim_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_path() {
        let config = GatewayConfig::new("http://backend.local/", "http://gateway.local");
        assert_eq!(config.token_url(), "http://backend.local/api/wx/getToken");
        assert_eq!(
            config.class_list_url(),
            "http://gateway.local/k12-assistant-api/api/v1.0/acl/wx/1/class/all/list"
        );
        assert_eq!(config.roster_url(), "http://backend.local/api/wx/class/getStudentList");
        assert_eq!(config.send_url(), "http://backend.local/api/wx/sms/send");
    }

    #[test]
    fn token_attempts_never_zero() {
        let config = GatewayConfig::default().with_token_attempts(0);
        assert_eq!(config.token_attempts, 1);
    }

    #[test]
    fn class_list_headers_carry_staff_token_slot() {
        let headers = GatewayConfig::default().class_list_headers();
        assert_eq!(headers.get("stafftoken").map(String::as_str), Some(""));
        assert!(!headers.contains_key("Host"));
    }
}
