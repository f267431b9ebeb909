//! Error types for crafty-core

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] crafty_gateway::GatewayError),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
