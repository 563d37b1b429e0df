use crate::error::ConfigError;
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

fn default_timeout() -> u64 {
    30
}

fn default_metric_prefix() -> String {
    "enviromux".to_string()
}

/// Device credentials and endpoints, read once at startup.
#[derive(Deserialize, Debug, Clone)]
pub struct EnviromuxConfig {
    pub listening_port: u16,
    pub login_url: String,
    #[serde(rename = "json_url")]
    pub data_url: String,
    /// Device address, sent as the `Host` header of the data request.
    #[serde(rename = "ip")]
    pub device_address: String,
    pub user: String,
    #[serde(rename = "pswd")]
    pub password: String,
    /// Request timeout in seconds, shared by the login and data calls.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_metric_prefix")]
    pub metric_prefix: String,
}

impl EnviromuxConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::invalid("timeout", "must be greater than zero"));
        }
        for (field, value) in [
            ("login_url", &self.login_url),
            ("json_url", &self.data_url),
            ("ip", &self.device_address),
            ("user", &self.user),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        for (field, value) in [("login_url", &self.login_url), ("json_url", &self.data_url)] {
            validate_http_url(field, value)?;
        }
        if !is_valid_host(&self.device_address) {
            return Err(ConfigError::invalid(
                "ip",
                "must be a host or host:port usable as a Host header",
            ));
        }
        if !is_valid_metric_prefix(&self.metric_prefix) {
            return Err(ConfigError::invalid(
                "metric_prefix",
                "must match [a-zA-Z_:][a-zA-Z0-9_:]* or be empty",
            ));
        }
        Ok(self)
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::invalid(field, format!("not a valid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::invalid(
            field,
            format!("unsupported scheme '{}', expected http or https", scheme),
        )),
    }
}

/// A bare `host` or `host:port`, with nothing the `Host` header cannot carry.
fn is_valid_host(address: &str) -> bool {
    if address.chars().any(|c| c.is_whitespace() || c.is_control())
        || HeaderValue::from_str(address).is_err()
    {
        return false;
    }
    match Url::parse(&format!("http://{}", address)) {
        Ok(url) => {
            url.host_str().is_some()
                && url.username().is_empty()
                && url.path() == "/"
                && url.query().is_none()
                && url.fragment().is_none()
        }
        Err(_) => false,
    }
}

/// Prometheus metric name rules. An empty prefix disables prefixing.
fn is_valid_metric_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        Some(_) => false,
    }
}

pub(crate) fn load_enviromux_config() -> Result<EnviromuxConfig, ConfigError> {
    envy::prefixed("ENVIROMUX_")
        .from_env::<EnviromuxConfig>()
        .map_err(ConfigError::env_parse)?
        .validate()
}
