//! HTTP endpoint scraped by Prometheus.

use std::error::Error as StdError;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::exposition;
use crate::model::SnapshotCollector;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    collector: Arc<dyn SnapshotCollector>,
    metric_prefix: Arc<str>,
}

fn create_router(collector: Arc<dyn SnapshotCollector>, metric_prefix: &str) -> Router {
    let state = AppState {
        collector,
        metric_prefix: Arc::from(metric_prefix),
    };

    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Runs one collection cycle per request.
///
/// A failed cycle answers 500 with no samples so Prometheus marks the
/// scrape as failed instead of recording stale or zeroed values.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.collector.collect().await {
        Ok(set) => (
            StatusCode::OK,
            [("content-type", exposition::CONTENT_TYPE)],
            exposition::render(&set, &state.metric_prefix),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("collection failed: {}\n", error_chain(&e)),
        )
            .into_response(),
    }
}

async fn health_handler() -> Response {
    (StatusCode::OK, "healthy\n").into_response()
}

/// Joins an error and its sources into one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub struct HttpServer {
    collector: Arc<dyn SnapshotCollector>,
    listen_addr: SocketAddr,
    metric_prefix: String,
}

impl HttpServer {
    pub fn new(
        collector: Arc<dyn SnapshotCollector>,
        listen_addr: SocketAddr,
        metric_prefix: String,
    ) -> Self {
        Self {
            collector,
            listen_addr,
            metric_prefix,
        }
    }

    /// Serves until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = create_router(self.collector, &self.metric_prefix);
        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .with_context(|| format!("Failed to bind to {}", self.listen_addr))?;

        tracing::info!("Serving metrics on http://{}/metrics", self.listen_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
