//! Container list synchronizer and its poll task

use crate::{Observable, Result};
use crafty_gateway::{Container, Gateway};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Authoritative in-memory container list
#[derive(Debug, Default)]
pub struct ContainerList {
    containers: Observable<Vec<Container>>,
}

impl ContainerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn containers(&self) -> &Observable<Vec<Container>> {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.get().is_empty()
    }

    /// Clone of the container at `index`
    pub fn get(&self, index: usize) -> Option<Container> {
        self.containers.get().get(index).cloned()
    }

    /// Replace the whole list
    pub fn replace(&self, containers: Vec<Container>) {
        self.containers.set(containers);
    }

    /// Fetch all containers and replace the list
    ///
    /// On failure the previous list is kept.
    pub async fn init_containers(&self, gateway: &dyn Gateway) -> Result<()> {
        let containers = gateway.list_containers().await?;
        tracing::debug!("Fetched {} containers", containers.len());
        self.replace(containers);
        Ok(())
    }
}

/// Result of one poll tick, tagged with the epoch of the view that spawned it
#[derive(Debug, Clone, PartialEq)]
pub struct ListRefresh {
    pub epoch: u64,
    pub containers: Vec<Container>,
}

/// Owned handle to a running poll task; cancels the task when dropped
#[derive(Debug)]
pub struct PollHandle {
    handle: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a task that re-fetches the container list every `interval`
///
/// The first fetch happens one interval from now. Each fetch is awaited
/// before the next tick, so this task never has two requests in flight.
/// Failed fetches are logged and retried on the next tick. The task ends
/// when cancelled or when the receiving side is gone.
pub fn spawn_poll(
    gateway: Arc<dyn Gateway>,
    interval: Duration,
    epoch: u64,
    tx: mpsc::UnboundedSender<ListRefresh>,
) -> PollHandle {
    let handle = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            tracing::debug!("Poll tick (epoch {})", epoch);
            match gateway.list_containers().await {
                Ok(containers) => {
                    if tx.send(ListRefresh { epoch, containers }).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!("Container poll failed: {}", e),
            }
        }
    });

    PollHandle { handle }
}
