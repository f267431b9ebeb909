//! Workspace navigation transitions
//!
//! Navigation never mutates state directly: every transition yields a
//! [`Route`], and the workspace state is rebuilt from the route when it
//! is entered.

use crate::Route;
use crafty_gateway::{FileEntry, Gateway};

/// What the renderer should do in response to a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Change the active route
    Navigate(Route),
    /// Open an external target (a download URL); no state changes
    Open(String),
}

/// Drop the last `/` segment; the root stays the root
pub fn parent_path(path: &str) -> String {
    path.rsplit_once('/')
        .map(|(parent, _)| parent.to_string())
        .unwrap_or_default()
}

/// Which container's workspace is shown, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub container_name: String,
    /// `/`-delimited, `""` is the workspace root
    pub current_path: String,
}

impl NavigationState {
    /// Build from route parameters; a missing path means the root
    pub fn new(container_name: impl Into<String>, path: Option<&str>) -> Self {
        Self {
            container_name: container_name.into(),
            current_path: path.unwrap_or_default().to_string(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.current_path.is_empty()
    }

    /// Whether `..` leads anywhere; invoking it at the root is still allowed
    pub fn can_go_up(&self) -> bool {
        !self.is_root()
    }

    /// Path segments from the root, for breadcrumbs
    pub fn segments(&self) -> Vec<&str> {
        self.current_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn route_to(&self, path: impl Into<String>) -> Route {
        Route::workspace(self.container_name.clone(), path)
    }

    /// Route that re-enters the current directory, forcing a re-fetch
    pub fn refresh(&self) -> Route {
        self.route_to(self.current_path.clone())
    }

    /// Directories are entered; files are opened as download targets
    pub fn navigate_into(&self, entry: &FileEntry, gateway: &dyn Gateway) -> Intent {
        if entry.is_dir {
            Intent::Navigate(self.route_to(entry.path.clone()))
        } else {
            Intent::Open(self.download_target(entry, gateway))
        }
    }

    pub fn download_target(&self, entry: &FileEntry, gateway: &dyn Gateway) -> String {
        gateway.download_url(&self.container_name, Some(&entry.path))
    }

    pub fn up_one_level(&self) -> Route {
        self.route_to(parent_path(&self.current_path))
    }

    /// Leave the workspace for the container list
    pub fn home(&self) -> Route {
        Route::List
    }
}
