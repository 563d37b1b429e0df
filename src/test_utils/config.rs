//! Configuration utilities for testing.

use crate::config::EnviromuxConfig;

/// Builder for creating test device configurations.
///
/// Endpoints are derived from a base URL so tests can point the client at
/// a local mock server.
#[derive(Debug)]
pub struct TestEnviromuxConfigBuilder {
    base_url: String,
    device_address: String,
    user: String,
    password: String,
    timeout: u64,
}

impl TestEnviromuxConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            base_url: "http://test.local".to_string(),
            device_address: "10.0.0.5".to_string(),
            user: "test_user".to_string(),
            password: "test_password".to_string(),
            timeout: 5,
        }
    }

    /// Sets the base URL both endpoints are built from.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the device configuration.
    pub fn build(self) -> EnviromuxConfig {
        EnviromuxConfig {
            listening_port: 0,
            login_url: format!("{}/goform/login", self.base_url),
            data_url: format!("{}/data.json", self.base_url),
            device_address: self.device_address,
            user: self.user,
            password: self.password,
            timeout: self.timeout,
            metric_prefix: "enviromux".to_string(),
        }
    }
}
