//! Terminal UI for the crafty control panel
//!
//! Built with Ratatui. Views are driven by a [`crafty_core::Session`]:
//! the container list (with its background poll) and a container's
//! workspace browser.

pub mod app;
mod event;
mod opener;
pub mod ui;
pub mod widgets;

pub use app::{App, AppError, AppResult, ContextAction, FormField};
pub use event::{Event, EventHandler};
pub use opener::{open_target, Delivery};

use crafty_config::GlobalConfig;
use crafty_core::{Route, SessionConfig};
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use tracing_subscriber::layer::SubscriberExt;

/// Run the TUI against the configured server, starting at `initial`
pub async fn run(config: &GlobalConfig, initial: Route) -> AppResult<()> {
    let gateway = crafty_gateway::create_gateway(config)?;

    // Logs would corrupt the display; the guard restores the previous subscriber
    let _guard = tracing::subscriber::set_default(
        tracing_subscriber::registry().with(tracing_subscriber::layer::Identity::new()),
    );

    let mut app = App::new(gateway, SessionConfig::from(config), initial).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    res
}
