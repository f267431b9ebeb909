//! Test support utilities for crafty-gateway
//!
//! Provides an in-memory [`MockGateway`] that behaves like a tiny crafty
//! server: it keeps a container list and workspace tree, applies mutations
//! to them, and records every call.

use crate::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Records which methods were called on the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    ListContainers,
    ListVersions,
    CreateContainer(NewContainer),
    Action { name: String, action: LifecycleAction },
    Remove { name: String },
    ListWorkspace { name: String, path: String },
    Upload { name: String, body: MultipartBody },
    MakeDir { name: String, request: MakeDirRequest },
    DeleteFile { name: String, path: String },
}

/// Operation selector for injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    ListContainers,
    ListVersions,
    CreateContainer,
    Action,
    Remove,
    ListWorkspace,
    Upload,
    MakeDir,
    DeleteFile,
}

/// Configurable in-memory gateway for testing
pub struct MockGateway {
    calls: Mutex<Vec<MockCall>>,
    failures: Mutex<HashMap<MockOp, GatewayError>>,
    /// Containers returned by `list_containers`
    pub containers: Mutex<Vec<Container>>,
    /// Versions returned by `list_versions`
    pub versions: Mutex<Vec<String>>,
    /// Workspace entries keyed by container name
    pub workspaces: Mutex<HashMap<String, Vec<FileEntry>>>,
    /// When false, `create_container` answers with a null value
    pub echo_created: Mutex<bool>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Create an empty mock with default success results
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            containers: Mutex::new(Vec::new()),
            versions: Mutex::new(vec!["1.9".to_string(), "1.12".to_string()]),
            workspaces: Mutex::new(HashMap::new()),
            echo_created: Mutex::new(true),
        }
    }

    /// Seed the container list
    pub fn with_containers(self, containers: Vec<Container>) -> Self {
        *self.containers.lock().unwrap() = containers;
        self
    }

    /// Seed a container's workspace
    pub fn with_files(self, name: &str, files: Vec<FileEntry>) -> Self {
        self.workspaces
            .lock()
            .unwrap()
            .insert(name.to_string(), files);
        self
    }

    /// Make every subsequent call of `op` fail with `error`
    pub fn fail(&self, op: MockOp, error: GatewayError) {
        self.failures.lock().unwrap().insert(op, error);
    }

    /// Clear an injected failure
    pub fn succeed(&self, op: MockOp) {
        self.failures.lock().unwrap().remove(&op);
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a specific call was made
    pub fn was_called(&self, call: &MockCall) -> bool {
        self.calls.lock().unwrap().contains(call)
    }

    /// Number of recorded calls matching the predicate
    pub fn count_calls(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: MockCall, op: MockOp) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn insert_entry(&self, name: &str, entry: FileEntry) {
        let mut workspaces = self.workspaces.lock().unwrap();
        let files = workspaces.entry(name.to_string()).or_default();
        files.retain(|f| f.path != entry.path);
        files.push(entry);
    }
}

/// `parent/child`, or `child` at the root
fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent, child)
    }
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

/// Create a container in the given state
pub fn mock_container(name: &str, state: ContainerState) -> Container {
    Container {
        name: name.to_string(),
        state,
        ports: vec!["25565".to_string()],
        version: "1.12".to_string(),
        forge_version: String::new(),
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_containers(&self) -> Result<Vec<Container>> {
        self.record(MockCall::ListContainers, MockOp::ListContainers)?;
        Ok(self.containers.lock().unwrap().clone())
    }

    async fn list_versions(&self) -> Result<Vec<String>> {
        self.record(MockCall::ListVersions, MockOp::ListVersions)?;
        Ok(self.versions.lock().unwrap().clone())
    }

    async fn create_container(&self, request: &NewContainer) -> Result<Option<Container>> {
        self.record(
            MockCall::CreateContainer(request.clone()),
            MockOp::CreateContainer,
        )?;
        let container = Container {
            name: request.name.clone(),
            state: ContainerState::Running,
            ports: if request.port.is_empty() {
                Vec::new()
            } else {
                vec![request.port.clone()]
            },
            version: request.version.clone(),
            forge_version: request.forge_version.clone(),
        };
        self.containers.lock().unwrap().push(container.clone());
        if *self.echo_created.lock().unwrap() {
            Ok(Some(container))
        } else {
            Ok(None)
        }
    }

    async fn container_action(&self, name: &str, action: LifecycleAction) -> Result<()> {
        self.record(
            MockCall::Action {
                name: name.to_string(),
                action,
            },
            MockOp::Action,
        )?;
        let mut containers = self.containers.lock().unwrap();
        let container = containers
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| GatewayError::Server(format!("No such container: {}", name)))?;
        container.state = match action {
            LifecycleAction::Start | LifecycleAction::Restart => ContainerState::Running,
            LifecycleAction::Stop => ContainerState::Stopped,
        };
        Ok(())
    }

    async fn remove_container(&self, name: &str) -> Result<()> {
        self.record(
            MockCall::Remove {
                name: name.to_string(),
            },
            MockOp::Remove,
        )?;
        self.containers.lock().unwrap().retain(|c| c.name != name);
        Ok(())
    }

    async fn list_workspace(&self, name: &str, path: &str) -> Result<Vec<FileEntry>> {
        self.record(
            MockCall::ListWorkspace {
                name: name.to_string(),
                path: path.to_string(),
            },
            MockOp::ListWorkspace,
        )?;
        let workspaces = self.workspaces.lock().unwrap();
        Ok(workspaces
            .get(name)
            .map(|files| {
                files
                    .iter()
                    .filter(|f| parent_of(&f.path) == path)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn upload(&self, name: &str, body: MultipartBody) -> Result<()> {
        self.record(
            MockCall::Upload {
                name: name.to_string(),
                body: body.clone(),
            },
            MockOp::Upload,
        )?;
        let dir = body.text("path").unwrap_or("").to_string();
        for file in body.files() {
            self.insert_entry(
                name,
                FileEntry::file(file.file_name.clone(), join_path(&dir, &file.file_name)),
            );
        }
        Ok(())
    }

    async fn make_dir(&self, name: &str, request: &MakeDirRequest) -> Result<()> {
        self.record(
            MockCall::MakeDir {
                name: name.to_string(),
                request: request.clone(),
            },
            MockOp::MakeDir,
        )?;
        self.insert_entry(
            name,
            FileEntry::dir(request.name.clone(), join_path(&request.path, &request.name)),
        );
        Ok(())
    }

    async fn delete_file(&self, name: &str, path: &str) -> Result<()> {
        self.record(
            MockCall::DeleteFile {
                name: name.to_string(),
                path: path.to_string(),
            },
            MockOp::DeleteFile,
        )?;
        let nested = format!("{}/", path);
        if let Some(files) = self.workspaces.lock().unwrap().get_mut(name) {
            files.retain(|f| f.path != path && !f.path.starts_with(&nested));
        }
        Ok(())
    }

    fn download_url(&self, name: &str, path: Option<&str>) -> String {
        match path {
            Some(path) => format!("http://mock/workspace/{}/file?path={}", name, path),
            None => format!("http://mock/workspace/{}/file", name),
        }
    }
}
