//! Configuration for crafty
//!
//! This crate handles the global configuration file
//! (`~/.config/crafty/config.toml` on Linux).

mod error;
mod global;

pub use error::*;
pub use global::*;
