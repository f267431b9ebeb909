//! Errors raised while locating, reading or writing `config.toml`

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is unusable, e.g. an empty server URL
    #[error("Bad config value: {0}")]
    Invalid(String),

    #[error("No home directory to keep crafty's config in")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
