//! Fire-and-forget container lifecycle actions
//!
//! Requests are spawned and never reported back to the user; the next
//! poll tick is what makes the new state visible. There is no way to
//! cancel a request once it is in flight.

use crate::Intent;
use crafty_gateway::{Container, Gateway, LifecycleAction};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct LifecycleDispatcher {
    gateway: Arc<dyn Gateway>,
}

impl LifecycleDispatcher {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub fn start(&self, container: &Container) -> JoinHandle<()> {
        self.transition(container, LifecycleAction::Start)
    }

    pub fn stop(&self, container: &Container) -> JoinHandle<()> {
        self.transition(container, LifecycleAction::Stop)
    }

    pub fn restart(&self, container: &Container) -> JoinHandle<()> {
        self.transition(container, LifecycleAction::Restart)
    }

    pub fn remove(&self, container: &Container) -> JoinHandle<()> {
        let gateway = self.gateway.clone();
        let name = container.name.clone();
        tokio::spawn(async move {
            match gateway.remove_container(&name).await {
                Ok(()) => tracing::info!("Requested removal of {}", name),
                Err(e) => tracing::warn!("Failed to remove {}: {}", name, e),
            }
        })
    }

    /// Open the container's whole workspace as a download target
    pub fn download(&self, container: &Container) -> Intent {
        Intent::Open(self.gateway.download_url(&container.name, None))
    }

    fn transition(&self, container: &Container, action: LifecycleAction) -> JoinHandle<()> {
        let gateway = self.gateway.clone();
        let name = container.name.clone();
        tokio::spawn(async move {
            match gateway.container_action(&name, action).await {
                Ok(()) => tracing::info!("Requested {} of {}", action, name),
                Err(e) => tracing::warn!("Failed to {} {}: {}", action, name, e),
            }
        })
    }
}

impl std::fmt::Debug for LifecycleDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleDispatcher").finish_non_exhaustive()
    }
}
