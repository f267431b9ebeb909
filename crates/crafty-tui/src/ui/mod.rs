//! UI rendering for the TUI application

mod containers;
mod dialogs;
mod header_footer;
mod workspace;

use crate::app::{App, ContextAction, FormField};
use crate::widgets::{anchored_rect, DialogBuilder};
use crafty_core::{ContainerState, Route, ViewState, WorkspaceModal};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
};

use containers::*;
use dialogs::*;
use header_footer::*;
use workspace::*;

const CONTEXT_MENU_WIDTH: u16 = 14;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    app.screen = area;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    match app.session.view() {
        ViewState::List(_) => {
            draw_containers(frame, app, chunks[1]);
            if app.form_open() {
                draw_create_form(frame, app, area);
            }
        }
        ViewState::Workspace(_) => {
            draw_files(frame, app, chunks[1]);
            draw_workspace_overlays(frame, app, area);
        }
    }

    draw_footer(frame, app, chunks[2]);
}

/// Screen rectangle of a context menu opened at (`x`, `y`)
pub fn context_menu_rect(x: u16, y: u16, screen: Rect) -> Rect {
    let height = ContextAction::all().len() as u16 + 2;
    anchored_rect(x, y, CONTEXT_MENU_WIDTH, height, screen)
}

fn draw_workspace_overlays(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ws) = app.session.workspace() else {
        return;
    };
    match ws.modal.active() {
        Some(WorkspaceModal::MakeDirectory) => draw_make_dir(frame, app, area),
        Some(WorkspaceModal::Upload) => draw_upload(frame, app, area),
        None => {}
    }
    if ws.context_menu.is_open() {
        draw_context_menu(frame, app, area);
    }
}

fn state_style(state: &ContainerState) -> (&'static str, Color) {
    match state {
        ContainerState::Running => ("●", Color::Green),
        ContainerState::Paused => ("◐", Color::Yellow),
        ContainerState::Restarting => ("◌", Color::Cyan),
        ContainerState::Stopped => ("○", Color::DarkGray),
        ContainerState::Unknown(_) => ("?", Color::Red),
    }
}
