//! Wire types exchanged with the crafty server

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Server-reported lifecycle state of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerState {
    Running,
    Paused,
    Restarting,
    Stopped,
    /// Anything the server reports that we do not recognise
    Unknown(String),
}

impl Default for ContainerState {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Restarting => write!(f, "Restarting"),
            Self::Stopped => write!(f, "Stopped"),
            Self::Unknown(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for ContainerState {
    fn from(s: String) -> Self {
        // The server spells the restarting state "Restring..."
        match s.to_lowercase().trim_end_matches('.') {
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" | "restring" => Self::Restarting,
            "stopped" | "exited" => Self::Stopped,
            _ => Self::Unknown(s),
        }
    }
}

impl From<ContainerState> for String {
    fn from(state: ContainerState) -> Self {
        state.to_string()
    }
}

/// A managed game-server container as listed by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub name: String,
    pub state: ContainerState,
    /// Host ports bound to the game port, in server order
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<String>,
    pub version: String,
    /// Empty when the container runs vanilla
    pub forge_version: String,
}

impl Container {
    pub fn is_running(&self) -> bool {
        self.state == ContainerState::Running
    }

    pub fn has_forge(&self) -> bool {
        !self.forge_version.is_empty()
    }
}

/// One row of a workspace directory listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    /// Path relative to the workspace root, `/`-delimited
    pub path: String,
    #[serde(default)]
    pub is_dir: bool,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Body of `POST /api/containers/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContainer {
    pub name: String,
    pub version: String,
    /// Host port, empty to let the server pick
    pub port: String,
    pub forge_version: String,
    pub seed: String,
    pub difficulty: u8,
}

/// Body of `POST /api/containers/{name}/workspace/mkdir`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeDirRequest {
    pub name: String,
    /// Parent directory, `""` for the workspace root
    pub path: String,
}

/// State transitions issued with `PUT /api/containers/{name}/{action}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Start,
    Stop,
    Restart,
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file staged for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// Value of a single multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(UploadFile),
}

/// Named multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart payload, transport-agnostic so it can be inspected in tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<Part>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload payload: `file0..fileN` followed by the target `path`
    pub fn for_upload(files: &[UploadFile], path: &str) -> Self {
        let mut body = Self::new();
        for (i, file) in files.iter().enumerate() {
            body.push_file(format!("file{}", i), file.clone());
        }
        body.push_text("path", path);
        body
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: UploadFile) {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::File(file),
        });
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    /// Value of the first text field with the given name
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::Text(v) if p.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &UploadFile> {
        self.parts.iter().filter_map(|p| match &p.value {
            PartValue::File(f) => Some(f),
            PartValue::Text(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_decodes_server_shape() {
        let json = r#"{
            "name": "survival",
            "state": "Running",
            "version": "1.12",
            "ports": ["25565"],
            "forgeVersion": "",
            "hostConfig": "{}"
        }"#;
        let c: Container = serde_json::from_str(json).unwrap();
        assert_eq!(c.name, "survival");
        assert!(c.is_running());
        assert_eq!(c.ports, vec!["25565".to_string()]);
        assert!(!c.has_forge());
    }

    #[test]
    fn test_container_null_ports() {
        let json = r#"{"name": "creative", "state": "Stopped", "ports": null, "version": "1.9"}"#;
        let c: Container = serde_json::from_str(json).unwrap();
        assert!(c.ports.is_empty());
        assert_eq!(c.state, ContainerState::Stopped);
    }

    #[test]
    fn test_container_state_variants() {
        assert_eq!(ContainerState::from("Restring...".to_string()), ContainerState::Restarting);
        assert_eq!(ContainerState::from("Paused".to_string()), ContainerState::Paused);
        assert_eq!(
            ContainerState::from("Dead".to_string()),
            ContainerState::Unknown("Dead".to_string())
        );
        assert_eq!(ContainerState::Unknown("Dead".into()).to_string(), "Dead");
    }

    #[test]
    fn test_file_entry_uses_is_dir_key() {
        let e: FileEntry =
            serde_json::from_str(r#"{"name":"mods","path":"mods","isDir":true}"#).unwrap();
        assert_eq!(e, FileEntry::dir("mods", "mods"));
    }

    #[test]
    fn test_new_container_serializes_numeric_difficulty() {
        let req = NewContainer {
            name: "mc-test".into(),
            version: "1.12".into(),
            port: "25565".into(),
            difficulty: 1,
            ..Default::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["difficulty"], serde_json::json!(1));
        assert_eq!(value["forgeVersion"], serde_json::json!(""));
        assert_eq!(value["port"], serde_json::json!("25565"));
    }

    #[test]
    fn test_upload_body_part_order() {
        let files = vec![
            UploadFile::new("a.jar", b"a".to_vec()),
            UploadFile::new("b.jar", b"b".to_vec()),
        ];
        let body = MultipartBody::for_upload(&files, "mods");
        assert_eq!(body.part_names(), vec!["file0", "file1", "path"]);
        assert_eq!(body.text("path"), Some("mods"));
        assert_eq!(body.files().count(), 2);
    }
}
