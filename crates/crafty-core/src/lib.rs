//! Client-side state engine for crafty
//!
//! This crate provides:
//! - Observable state cells with change notification
//! - The container list synchronizer and its cancellable poll task
//! - Fire-and-forget container lifecycle actions
//! - The create-container form controller and validation
//! - Workspace navigation, uploads, directory creation and deletion
//! - Modal and context-menu slots
//! - Routing and the per-view enter/exit lifecycle ([`Session`])

mod dispatch;
mod error;
mod form;
mod list;
mod modal;
mod navigator;
mod observable;
mod route;
mod session;
mod upload;
mod workspace;

pub use dispatch::*;
pub use error::*;
pub use form::*;
pub use list::*;
pub use modal::*;
pub use navigator::*;
pub use observable::*;
pub use route::*;
pub use session::*;
pub use upload::*;
pub use workspace::*;

pub use crafty_gateway::{Container, ContainerState, FileEntry, Gateway, UploadFile};
