use crate::config::EnviromuxConfig;
use crate::enviromux::snapshot::DeviceSnapshot;
use crate::error::{AuthError, FetchError};
use reqwest::header::{COOKIE, HOST};
use reqwest::Client as HttpClient;
use serde_derive::{Deserialize, Serialize};

/// Key of the session value in the login response.
const SESSION_FIELD: &str = "cookie";

/// Opaque session value returned by the login endpoint.
///
/// Scoped to a single collection cycle; never stored between scrapes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    cookie: Option<String>,
}

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct Client {
    http_client: HttpClient,
    config: EnviromuxConfig,
}

impl Client {
    pub fn new(config: EnviromuxConfig) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Exchanges the configured credentials for a session token.
    pub async fn authenticate(&self) -> Result<SessionToken, AuthError> {
        let timeout = self.config.timeout;
        let response = self
            .http_client
            .post(&self.config.login_url)
            .form(&LoginForm {
                username: &self.config.user,
                password: &self.config.password,
            })
            .send()
            .await
            .map_err(|e| AuthError::from_reqwest(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::from_reqwest(e, timeout))?;
        if !status.is_success() {
            return Err(AuthError::rejected(status, body));
        }

        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::MalformedBody(e.to_string()))?;
        match login.cookie {
            Some(cookie) if !cookie.is_empty() => Ok(SessionToken(cookie)),
            _ => Err(AuthError::MissingToken(SESSION_FIELD)),
        }
    }

    /// Retrieves the status document using a session from [`Client::authenticate`].
    ///
    /// The token is sent as-is; a rejected token surfaces as a failed fetch.
    pub async fn fetch_snapshot(&self, token: &SessionToken) -> Result<DeviceSnapshot, FetchError> {
        let timeout = self.config.timeout;
        let response = self
            .http_client
            .get(&self.config.data_url)
            .header(HOST, &self.config.device_address)
            .header(COOKIE, token.as_str())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;
        if !status.is_success() {
            return Err(FetchError::server_error(status, body));
        }

        DeviceSnapshot::from_json(&body)
    }
}
