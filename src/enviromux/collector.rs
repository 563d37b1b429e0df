//! Collection orchestrator: Authenticating → Fetching → Mapping.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::enviromux::client::{Client, SessionToken};
use crate::enviromux::mapper::map_snapshot;
use crate::enviromux::snapshot::DeviceSnapshot;
use crate::error::CollectorError;
use crate::model::{MetricSet, SnapshotCollector};

/// Progress of a single collection cycle.
///
/// Each state owns the output of the previous one, so the cycle can only
/// move forward. `Done` and `Failed` are terminal.
#[derive(Debug)]
pub enum CycleState {
    Authenticating,
    Fetching(SessionToken),
    Mapping(DeviceSnapshot),
    Done(MetricSet),
    Failed(CollectorError),
}

impl CycleState {
    fn name(&self) -> &'static str {
        match self {
            CycleState::Authenticating => "authenticating",
            CycleState::Fetching(_) => "fetching",
            CycleState::Mapping(_) => "mapping",
            CycleState::Done(_) => "done",
            CycleState::Failed(_) => "failed",
        }
    }
}

/// Runs a full cycle against the device for every scrape.
///
/// Overlapping scrapes are serialized: the lock is held for the whole
/// cycle, so the device never sees interleaved login/data calls from this
/// exporter. Nothing is shared between cycles.
pub struct EnviromuxCollector {
    client: Arc<Client>,
    cycle_lock: Mutex<()>,
}

impl EnviromuxCollector {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            cycle_lock: Mutex::new(()),
        }
    }

    async fn advance(&self, state: CycleState) -> CycleState {
        match state {
            CycleState::Authenticating => match self.client.authenticate().await {
                Ok(token) => CycleState::Fetching(token),
                Err(e) => CycleState::Failed(e.into()),
            },
            CycleState::Fetching(token) => match self.client.fetch_snapshot(&token).await {
                Ok(snapshot) => CycleState::Mapping(snapshot),
                Err(e) => CycleState::Failed(e.into()),
            },
            CycleState::Mapping(snapshot) => CycleState::Done(map_snapshot(&snapshot)),
            terminal => terminal,
        }
    }

    /// Drives a fresh cycle until it reaches `Done` or `Failed`.
    pub async fn run_cycle(&self) -> Result<MetricSet, CollectorError> {
        let _guard = self.cycle_lock.lock().await;

        let mut state = CycleState::Authenticating;
        loop {
            tracing::debug!("Collection cycle: {}", state.name());
            state = match self.advance(state).await {
                CycleState::Done(set) => return Ok(set),
                CycleState::Failed(e) => return Err(e),
                next => next,
            };
        }
    }
}

#[async_trait]
impl SnapshotCollector for EnviromuxCollector {
    async fn collect(&self) -> Result<MetricSet, CollectorError> {
        match self.run_cycle().await {
            Ok(set) => {
                tracing::debug!(
                    "Collected {} records ({} defects)",
                    set.record_count(),
                    set.defects.len()
                );
                Ok(set)
            }
            Err(e) => {
                tracing::error!("Collection cycle failed: {:?}", e);
                Err(e)
            }
        }
    }
}
