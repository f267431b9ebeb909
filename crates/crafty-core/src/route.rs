//! Hash routes and navigation history
//!
//! Two routes exist: `#/` (container list) and
//! `#/workspace/<name>?path=<path>` (a container's workspace). The route
//! is the single source of truth for workspace navigation state.

use crate::{CoreError, Result};
use reqwest::Url;

const ROUTE_BASE: &str = "crafty://app/";

/// Top-level view addressed by a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Workspace { name: String, path: String },
}

impl Route {
    pub fn workspace(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Workspace {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Render as a hash fragment, e.g. `#/workspace/survival?path=mods`
    pub fn to_hash(&self) -> String {
        let mut url = match Url::parse(ROUTE_BASE) {
            Ok(url) => url,
            Err(_) => return "#/".to_string(),
        };
        if let Self::Workspace { name, path } = self {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().extend(["workspace", name.as_str()]);
            }
            if !path.is_empty() {
                url.query_pairs_mut().append_pair("path", path);
            }
        }
        match url.query() {
            Some(query) => format!("#{}?{}", url.path(), query),
            None => format!("#{}", url.path()),
        }
    }

    /// Parse a hash fragment (leading `#` optional)
    pub fn parse(hash: &str) -> Result<Self> {
        let raw = hash.strip_prefix('#').unwrap_or(hash);
        let raw = if raw.is_empty() { "/" } else { raw };
        let unknown = || CoreError::UnknownRoute(hash.to_string());

        if !raw.starts_with('/') {
            return Err(unknown());
        }
        let url = Url::parse(ROUTE_BASE)
            .and_then(|base| base.join(raw))
            .map_err(|_| unknown())?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Self::List),
            ["workspace", name] => {
                let path = url
                    .query_pairs()
                    .find(|(key, _)| key == "path")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                Ok(Self::workspace(*name, path))
            }
            _ => Err(unknown()),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hash())
    }
}

impl std::str::FromStr for Route {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Current route plus back stack
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Make `route` current. Re-navigating to the current route does not
    /// grow the history.
    pub fn push(&mut self, route: Route) {
        if route != self.current {
            let previous = std::mem::replace(&mut self.current, route);
            self.history.push(previous);
        }
    }

    /// Pop back to the previous route, if any
    pub fn back(&mut self) -> Option<&Route> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(&self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}
