use crate::error::CollectorError;
use async_trait::async_trait;

use super::metrics::MetricSet;

/// Trait for types that produce a complete metric set on demand.
///
/// The HTTP layer calls this once per scrape. Implementors must be
/// thread-safe (Send + Sync) since scrapes arrive on arbitrary tasks.
#[async_trait]
pub trait SnapshotCollector: Send + Sync {
    /// Runs one full collection cycle.
    ///
    /// # Returns
    /// - `Ok(MetricSet)` with every family, possibly with empty ones
    /// - `Err` if the cycle was aborted; no partial set is ever returned
    async fn collect(&self) -> Result<MetricSet, CollectorError>;
}
