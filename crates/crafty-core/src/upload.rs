//! Upload staging and payload assembly

use crate::{CoreError, Result};
use crafty_gateway::{MultipartBody, UploadFile};
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Files selected through the picker or dropped onto the workspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPipeline {
    selected: Vec<UploadFile>,
}

impl UploadPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the staged selection
    pub fn select(&mut self, files: Vec<UploadFile>) {
        self.selected = files;
    }

    pub fn selected(&self) -> &[UploadFile] {
        &self.selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn validate(&self) -> Vec<String> {
        if self.selected.is_empty() {
            vec!["Invalid file".to_string()]
        } else {
            Vec::new()
        }
    }

    /// One `fileN` part per staged file, then the target directory
    pub fn assemble(&self, path: &str) -> MultipartBody {
        MultipartBody::for_upload(&self.selected, path)
    }
}

/// Read local files into upload parts, named after their file names
pub async fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| CoreError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(UploadFile::new(file_name, contents));
    }
    Ok(files)
}

/// Split pasted text into file paths
///
/// Terminals paste dropped files as whitespace-separated paths, quoting
/// or backslash-escaping names that contain spaces, and some use
/// `file://` URIs.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (c, quote) {
            ('\\', _) => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ('\'' | '"', None) => quote = Some(c),
            (q, Some(open)) if q == open => quote = None,
            (c, None) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(std::mem::take(&mut current));
                }
            }
            (c, _) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(current);
    }

    paths
        .into_iter()
        .map(|p| {
            if p.starts_with("file://") {
                if let Some(path) = Url::parse(&p).ok().and_then(|u| u.to_file_path().ok()) {
                    return path;
                }
            }
            PathBuf::from(p)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_invalid() {
        let pipeline = UploadPipeline::new();
        assert_eq!(pipeline.validate(), vec!["Invalid file"]);
    }

    #[test]
    fn test_assemble_two_files() {
        let mut pipeline = UploadPipeline::new();
        pipeline.select(vec![
            UploadFile::new("a.jar", b"a".to_vec()),
            UploadFile::new("b.jar", b"b".to_vec()),
        ]);
        assert!(pipeline.validate().is_empty());

        let body = pipeline.assemble("mods");
        assert_eq!(body.part_names(), vec!["file0", "file1", "path"]);
        assert_eq!(body.text("path"), Some("mods"));
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut pipeline = UploadPipeline::new();
        pipeline.select(vec![UploadFile::new("a.jar", b"a".to_vec())]);
        pipeline.select(vec![UploadFile::new("b.jar", b"b".to_vec())]);
        assert_eq!(pipeline.selected().len(), 1);
        assert_eq!(pipeline.selected()[0].file_name, "b.jar");
    }

    #[tokio::test]
    async fn test_load_files_reads_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ops.json");
        std::fs::write(&path, b"[]").unwrap();

        let files = load_files(&[&path]).await.unwrap();
        assert_eq!(files, vec![UploadFile::new("ops.json", b"[]".to_vec())]);
    }

    #[tokio::test]
    async fn test_load_files_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_files(&[tmp.path().join("nope.jar")]).await.unwrap_err();
        assert!(matches!(err, CoreError::ReadFile { .. }));
    }

    #[test]
    fn test_parse_dropped_paths() {
        assert_eq!(
            parse_dropped_paths("/tmp/a.jar /tmp/b.jar\n"),
            vec![PathBuf::from("/tmp/a.jar"), PathBuf::from("/tmp/b.jar")]
        );
        assert_eq!(
            parse_dropped_paths(r"'/tmp/my world.zip' /tmp/with\ space.txt"),
            vec![
                PathBuf::from("/tmp/my world.zip"),
                PathBuf::from("/tmp/with space.txt")
            ]
        );
        assert_eq!(
            parse_dropped_paths("file:///home/steve/server%20icon.png"),
            vec![PathBuf::from("/home/steve/server icon.png")]
        );
        assert!(parse_dropped_paths("   ").is_empty());
    }
}
