//! Mock implementations and server helpers for testing.
//!
//! This module provides a mock device web API and a scripted
//! [`SnapshotCollector`] for exercising the HTTP layer in isolation.

use crate::error::CollectorError;
use crate::model::{FamilyKind, MetricFamily, MetricRecord, MetricSet, SnapshotCollector};
use crate::test_utils::fixtures::login_body;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock device exposing the login and data endpoints used by
/// `TestEnviromuxConfigBuilder::with_base_url`.
///
/// Call counts given to the `expect_*` helpers are verified when the
/// server is dropped.
pub struct MockEnviromuxServer {
    server: MockServer,
}

impl MockEnviromuxServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Login succeeds and hands out `cookie`.
    pub async fn expect_login(&self, cookie: &str, times: u64) {
        self.expect_login_with_delay(cookie, Duration::ZERO, times)
            .await;
    }

    pub async fn expect_login_with_delay(&self, cookie: &str, delay: Duration, times: u64) {
        Mock::given(method("POST"))
            .and(path("/goform/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(login_body(cookie))
                    .set_delay(delay),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn expect_login_failure(&self, status: u16, times: u64) {
        Mock::given(method("POST"))
            .and(path("/goform/login"))
            .respond_with(ResponseTemplate::new(status).set_body_string("login failed"))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Data endpoint answers `body` when called with the `cookie` session.
    pub async fn expect_snapshot(&self, cookie: &str, body: &str, times: u64) {
        self.expect_snapshot_with_delay(cookie, body, Duration::ZERO, times)
            .await;
    }

    pub async fn expect_snapshot_with_delay(
        &self,
        cookie: &str,
        body: &str,
        delay: Duration,
        times: u64,
    ) {
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .and(header("cookie", cookie))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .set_delay(delay),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn expect_snapshot_failure(&self, status: u16, times: u64) {
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(ResponseTemplate::new(status).set_body_string("session expired"))
            .expect(times)
            .mount(&self.server)
            .await;
    }
}

/// A collector returning a canned set or a scripted failure.
pub struct MockSnapshotCollector {
    result: Box<dyn Fn() -> Result<MetricSet, CollectorError> + Send + Sync>,
    calls: AtomicUsize,
}

impl MockSnapshotCollector {
    /// Succeeds with [`sample_metric_set`].
    pub fn new_success() -> Self {
        Self {
            result: Box::new(|| Ok(sample_metric_set())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every cycle with the error produced by `make_error`.
    pub fn new_failure<F>(make_error: F) -> Self
    where
        F: Fn() -> CollectorError + Send + Sync + 'static,
    {
        Self {
            result: Box::new(move || Err(make_error())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotCollector for MockSnapshotCollector {
    async fn collect(&self) -> Result<MetricSet, CollectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.result)()
    }
}

/// Every family, with one internal temperature reading.
pub fn sample_metric_set() -> MetricSet {
    let families = FamilyKind::ALL
        .iter()
        .map(|kind| {
            let mut family = MetricFamily::new(*kind);
            if *kind == FamilyKind::IsensValue {
                family.records.push(
                    MetricRecord::new(*kind, 22.3)
                        .label("instance", "TEMP1")
                        .label("unit", "C")
                        .label("metric_type", "value"),
                );
            }
            family
        })
        .collect();

    MetricSet {
        families,
        defects: vec![],
    }
}
