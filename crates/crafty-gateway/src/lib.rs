//! Remote call gateway for crafty
//!
//! This crate wraps the crafty server's REST API behind the [`Gateway`]
//! trait so the state engine never deals with HTTP directly.

mod envelope;
mod error;
mod http;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use envelope::{ValueEnvelope, ValuesEnvelope};
pub use error::*;
pub use http::HttpGateway;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Trait for the control panel API
///
/// Every method is a single request; nothing is retried.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `GET /api/containers/`
    async fn list_containers(&self) -> Result<Vec<Container>>;

    /// `GET /api/versions`
    async fn list_versions(&self) -> Result<Vec<String>>;

    /// `POST /api/containers/`
    ///
    /// `Ok(None)` means the server accepted the request without echoing a container.
    async fn create_container(&self, request: &NewContainer) -> Result<Option<Container>>;

    /// `PUT /api/containers/{name}/start|stop|restart`
    async fn container_action(&self, name: &str, action: LifecycleAction) -> Result<()>;

    /// `DELETE /api/containers/{name}`
    async fn remove_container(&self, name: &str) -> Result<()>;

    /// `GET /api/containers/{name}/workspace?path=...`
    async fn list_workspace(&self, name: &str, path: &str) -> Result<Vec<FileEntry>>;

    /// `POST /api/containers/{name}/workspace/upload`
    async fn upload(&self, name: &str, body: MultipartBody) -> Result<()>;

    /// `POST /api/containers/{name}/workspace/mkdir`
    async fn make_dir(&self, name: &str, request: &MakeDirRequest) -> Result<()>;

    /// `DELETE /api/containers/{name}/workspace/file?path=...`
    async fn delete_file(&self, name: &str, path: &str) -> Result<()>;

    /// Absolute download target for a workspace file, or the whole
    /// workspace archive when `path` is `None`
    fn download_url(&self, name: &str, path: Option<&str>) -> String;
}

/// Create the HTTP gateway described by the global config
pub fn create_gateway(config: &crafty_config::GlobalConfig) -> Result<Arc<dyn Gateway>> {
    let gateway = HttpGateway::new(&config.server)?;
    tracing::debug!("Using crafty server at {}", gateway.base_url());
    Ok(Arc::new(gateway))
}
