//! Main TUI application state and input handling

use crate::event::{Event, EventHandler};
use crate::opener::{self, Delivery};
use crate::ui;
use crate::widgets::{edit_field, TextInput};
use crafty_core::{
    load_files, parse_dropped_paths, Container, CoreError, DraftContainer, FileEntry, Gateway,
    Route, Session, SessionConfig, ViewState, WorkspaceModal, DIFFICULTIES,
};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{ListState, TableState};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] crafty_gateway::GatewayError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Fields of the create-container form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Port,
    Version,
    ForgeVersion,
    Seed,
    Difficulty,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::Port,
            FormField::Version,
            FormField::ForgeVersion,
            FormField::Seed,
            FormField::Difficulty,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Port => "Port",
            FormField::Version => "Version",
            FormField::ForgeVersion => "Forge",
            FormField::Seed => "Seed",
            FormField::Difficulty => "Difficulty",
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> FormField {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> FormField {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    /// The text this field edits in a draft
    pub fn value<'a>(&self, draft: &'a DraftContainer) -> &'a str {
        match self {
            FormField::Name => &draft.name,
            FormField::Port => &draft.port,
            FormField::Version => &draft.version,
            FormField::ForgeVersion => &draft.forge_version,
            FormField::Seed => &draft.seed,
            FormField::Difficulty => &draft.difficulty,
        }
    }

    fn value_mut<'a>(&self, draft: &'a mut DraftContainer) -> &'a mut String {
        match self {
            FormField::Name => &mut draft.name,
            FormField::Port => &mut draft.port,
            FormField::Version => &mut draft.version,
            FormField::ForgeVersion => &mut draft.forge_version,
            FormField::Seed => &mut draft.seed,
            FormField::Difficulty => &mut draft.difficulty,
        }
    }
}

/// Entries of the file context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    Download,
    Delete,
}

impl ContextAction {
    pub fn all() -> &'static [ContextAction] {
        &[ContextAction::Download, ContextAction::Delete]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContextAction::Download => "Download",
            ContextAction::Delete => "Delete",
        }
    }
}

/// Hands a download target to the desktop
pub type Opener = fn(&str) -> Result<Delivery, String>;

/// Application state
pub struct App {
    /// Router and active view state
    pub session: Session,
    /// Selected row of the container table
    pub selected: usize,
    pub table_state: TableState,
    /// Selected row of the workspace listing
    pub file_selected: usize,
    pub file_state: ListState,
    /// Focused field of the create form
    pub form_field: FormField,
    /// Input of the make-directory modal
    pub dir_input: TextInput,
    /// Input of the upload modal: whitespace-separated local paths
    pub upload_input: TextInput,
    /// Highlighted context menu entry
    pub context_selected: usize,
    /// Inner area of the file listing, recorded while drawing
    pub files_area: Rect,
    /// Whole frame, recorded while drawing
    pub screen: Rect,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub opener: Opener,
}

impl App {
    /// Start a session on `initial` and wrap it in an app
    pub async fn new(gateway: Arc<dyn Gateway>, config: SessionConfig, initial: Route) -> Self {
        let session = Session::start(gateway, config, initial).await;
        Self::from_session(session)
    }

    pub fn from_session(session: Session) -> Self {
        let mut app = Self {
            session,
            selected: 0,
            table_state: TableState::default(),
            file_selected: 0,
            file_state: ListState::default(),
            form_field: FormField::Name,
            dir_input: TextInput::new(),
            upload_input: TextInput::new(),
            context_selected: 0,
            files_area: Rect::default(),
            screen: Rect::default(),
            status_message: None,
            should_quit: false,
            opener: opener::open_target,
        };
        app.clamp_selection();
        app
    }

    /// App over `gateway` whose download targets are recorded in the
    /// status line instead of being opened
    pub async fn new_for_testing(gateway: Arc<dyn Gateway>, initial: Route) -> Self {
        let mut app = Self::new(gateway, SessionConfig::default(), initial).await;
        app.opener = |_| Ok(Delivery::Copied);
        app
    }

    /// Run the main loop until the user quits
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let mut events = EventHandler::new(Duration::from_millis(250));

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            tokio::select! {
                event = events.next() => {
                    match event {
                        Some(e) => self.handle_event(e).await?,
                        None => break,
                    }
                }
                refresh = self.session.next_refresh() => {
                    if let Some(refresh) = refresh {
                        self.session.apply_refresh(refresh);
                        self.clamp_selection();
                    }
                }
            }
        }

        Ok(())
    }

    pub async fn handle_event(&mut self, event: Event) -> AppResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key.code, key.modifiers).await?,
            Event::Mouse(mouse) => self.handle_mouse(mouse).await?,
            Event::Paste(text) => self.handle_paste(&text).await?,
            Event::Tick | Event::Resize(_, _) => {}
        }
        Ok(())
    }

    /// Convenience for driving the app from tests
    pub async fn send_key(&mut self, code: KeyCode) -> AppResult<()> {
        self.handle_key(code, KeyModifiers::NONE).await
    }

    pub async fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> AppResult<()> {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        let route = self.session.route().clone();
        match self.session.view() {
            ViewState::List(_) => self.handle_list_key(code).await?,
            ViewState::Workspace(_) => self.handle_workspace_key(code).await?,
        }
        self.after_action(&route);
        Ok(())
    }

    // ---- container list ----

    pub fn selected_container(&self) -> Option<Container> {
        self.session.list()?.containers.get(self.selected)
    }

    pub fn form_open(&self) -> bool {
        self.session.list().is_some_and(|l| l.form.is_open())
    }

    async fn handle_list_key(&mut self, code: KeyCode) -> AppResult<()> {
        if self.form_open() {
            return self.handle_form_key(code).await;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('n') => {
                self.form_field = FormField::Name;
                self.session.open_create_form();
            }
            KeyCode::Char('b') => {
                self.session.back().await;
            }
            KeyCode::Char('r') => {
                self.session.refresh_containers().await;
                self.status_message = Some("Refreshed".to_string());
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                if let Some(container) = self.selected_container() {
                    self.session.open_workspace(&container.name).await;
                }
            }
            KeyCode::Char('D') => {
                let target = self.session.list().and_then(|list| {
                    let container = list.containers.get(self.selected)?;
                    Some(list.dispatcher().download(&container))
                });
                if let Some(intent) = target {
                    if let Some(target) = self.session.follow(intent).await {
                        self.open(&target);
                    }
                }
            }
            KeyCode::Char(c @ ('s' | 'x' | 'R' | 'd')) => self.dispatch_lifecycle(c),
            _ => {}
        }
        Ok(())
    }

    /// Fire a lifecycle request for the selected container; the result
    /// shows up with the next poll
    fn dispatch_lifecycle(&mut self, key: char) {
        let Some(list) = self.session.list() else {
            return;
        };
        let Some(container) = list.containers.get(self.selected) else {
            return;
        };
        let dispatcher = list.dispatcher();
        let verb = match key {
            's' => {
                dispatcher.start(&container);
                "Starting"
            }
            'x' => {
                dispatcher.stop(&container);
                "Stopping"
            }
            'R' => {
                dispatcher.restart(&container);
                "Restarting"
            }
            _ => {
                dispatcher.remove(&container);
                "Removing"
            }
        };
        self.status_message = Some(format!("{} {}...", verb, container.name));
    }

    async fn handle_form_key(&mut self, code: KeyCode) -> AppResult<()> {
        match code {
            KeyCode::Esc => {
                if let Some(list) = self.session.list_mut() {
                    list.close_create_form();
                }
            }
            KeyCode::Enter => {
                let name = self
                    .session
                    .list()
                    .and_then(|l| l.form.draft())
                    .map(|d| d.name.clone())
                    .unwrap_or_default();
                self.session.submit_create_form().await;
                if !self.form_open() {
                    self.status_message = Some(format!("Created {}", name));
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form_field = self.form_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_field = self.form_field.prev(),
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                let field = self.form_field;
                if let Some(list) = self.session.list_mut() {
                    let versions = list.form.versions().to_vec();
                    if let Some(draft) = list.form.draft_mut() {
                        match field {
                            FormField::Version => {
                                draft.version = cycle(&versions, &draft.version, forward)
                            }
                            FormField::Difficulty => {
                                draft.difficulty = cycle_difficulty(&draft.difficulty, forward)
                            }
                            _ => {}
                        }
                    }
                }
            }
            _ => {
                let field = self.form_field;
                if let Some(draft) = self.session.list_mut().and_then(|l| l.form.draft_mut()) {
                    edit_field(field.value_mut(draft), code);
                }
            }
        }
        Ok(())
    }

    fn select_next(&mut self) {
        let len = self.session.list().map(|l| l.containers.len()).unwrap_or(0);
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn select_prev(&mut self) {
        let len = self.session.list().map(|l| l.containers.len()).unwrap_or(0);
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    // ---- workspace ----

    fn file_count(&self) -> usize {
        self.session
            .workspace()
            .map(|ws| ws.files().get().len())
            .unwrap_or(0)
    }

    pub fn selected_file(&self) -> Option<FileEntry> {
        self.session.workspace()?.file(self.file_selected)
    }

    async fn handle_workspace_key(&mut self, code: KeyCode) -> AppResult<()> {
        let Some(ws) = self.session.workspace() else {
            return Ok(());
        };
        if ws.context_menu.is_open() {
            return self.handle_context_key(code).await;
        }
        if let Some(modal) = ws.modal.active().copied() {
            return self.handle_modal_key(modal, code).await;
        }

        let len = self.file_count();
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if len > 0 {
                    self.file_selected = (self.file_selected + 1) % len;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if len > 0 {
                    self.file_selected = (self.file_selected + len - 1) % len;
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = self.selected_file() {
                    if let Some(target) = self.session.open_entry(&entry).await {
                        self.open(&target);
                    }
                }
            }
            KeyCode::Backspace | KeyCode::Char('u') => self.session.up_one_level().await,
            KeyCode::Char('h') => self.session.home().await,
            KeyCode::Char('b') => {
                self.session.back().await;
            }
            KeyCode::Char('r') => {
                let route = self.session.route().clone();
                self.session.navigate(route).await;
            }
            KeyCode::Char('m') => {
                self.dir_input.clear();
                if let Some(ws) = self.session.workspace_mut() {
                    ws.dir_name.clear();
                    ws.open_modal(WorkspaceModal::MakeDirectory);
                }
            }
            KeyCode::Char('U') => {
                self.upload_input.clear();
                if let Some(ws) = self.session.workspace_mut() {
                    ws.uploads.clear();
                    ws.open_modal(WorkspaceModal::Upload);
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_modal_key(&mut self, modal: WorkspaceModal, code: KeyCode) -> AppResult<()> {
        match code {
            KeyCode::Esc => {
                if let Some(ws) = self.session.workspace_mut() {
                    ws.close_modal();
                }
            }
            KeyCode::Enter => match modal {
                WorkspaceModal::MakeDirectory => {
                    let name = self.dir_input.value().trim().to_string();
                    if let Some(ws) = self.session.workspace_mut() {
                        ws.dir_name = name;
                    }
                    self.session.make_dir().await;
                }
                WorkspaceModal::Upload => self.submit_upload().await,
            },
            _ => {
                let input = match modal {
                    WorkspaceModal::MakeDirectory => &mut self.dir_input,
                    WorkspaceModal::Upload => &mut self.upload_input,
                };
                input.handle_key(code);
            }
        }
        Ok(())
    }

    /// Stage the typed paths and upload them
    async fn submit_upload(&mut self) {
        let paths = parse_dropped_paths(self.upload_input.value());
        match load_files(&paths).await {
            Ok(files) => {
                let count = files.len();
                if let Some(ws) = self.session.workspace_mut() {
                    ws.uploads.select(files);
                }
                if self.session.upload_selected().await {
                    self.status_message = Some(format!("Uploaded {} file(s)", count));
                }
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    async fn handle_context_key(&mut self, code: KeyCode) -> AppResult<()> {
        let items = ContextAction::all();
        match code {
            KeyCode::Esc => {
                if let Some(ws) = self.session.workspace_mut() {
                    ws.close_context_menu();
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.context_selected = (self.context_selected + 1) % items.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.context_selected = (self.context_selected + items.len() - 1) % items.len();
            }
            KeyCode::Enter => {
                let action = items[self.context_selected.min(items.len() - 1)];
                self.run_context_action(action).await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn run_context_action(&mut self, action: ContextAction) {
        let Some(menu) = self.session.workspace().and_then(|ws| ws.context_menu.get()) else {
            return;
        };
        let entry = menu.file.clone();
        match action {
            ContextAction::Download => {
                if let Some(ws) = self.session.workspace_mut() {
                    ws.close_context_menu();
                }
                if let Some(target) = self.session.download_target(&entry) {
                    self.open(&target);
                }
            }
            ContextAction::Delete => {
                if self.session.delete_entry(&entry).await {
                    self.status_message = Some(format!("Deleted {}", entry.name));
                }
            }
        }
    }

    /// Index of the file rendered at a screen cell
    pub fn file_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.files_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let index = self.file_state.offset() + (row - area.y) as usize;
        (index < self.file_count()).then_some(index)
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) -> AppResult<()> {
        let route = self.session.route().clone();
        let Some(ws) = self.session.workspace() else {
            return Ok(());
        };
        if ws.modal.is_open() {
            return Ok(());
        }
        let menu = ws.context_menu.get().cloned();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Right) => {
                let hit = self.file_at(mouse.column, mouse.row);
                let ws = self.session.workspace_mut();
                match (hit, ws) {
                    (Some(index), Some(ws)) => {
                        if let Some(entry) = ws.file(index) {
                            ws.open_context_menu(entry, mouse.column, mouse.row);
                            self.file_selected = index;
                            self.context_selected = 0;
                        }
                    }
                    (None, Some(ws)) => ws.close_context_menu(),
                    _ => {}
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(menu) = menu {
                    let area = ui::context_menu_rect(menu.x, menu.y, self.screen);
                    let item = mouse
                        .row
                        .checked_sub(area.y + 1)
                        .map(usize::from)
                        .filter(|_| {
                            mouse.column > area.x && mouse.column + 1 < area.x + area.width
                        })
                        .and_then(|i| ContextAction::all().get(i).copied());
                    match item {
                        Some(action) => self.run_context_action(action).await,
                        None => {
                            if let Some(ws) = self.session.workspace_mut() {
                                ws.close_context_menu();
                            }
                        }
                    }
                } else if let Some(index) = self.file_at(mouse.column, mouse.row) {
                    self.file_selected = index;
                }
            }
            MouseEventKind::ScrollDown => self.handle_workspace_key(KeyCode::Down).await?,
            MouseEventKind::ScrollUp => self.handle_workspace_key(KeyCode::Up).await?,
            _ => {}
        }

        self.after_action(&route);
        Ok(())
    }

    /// Pasted text goes into the focused input; pasted paths on a bare
    /// listing are uploaded straight away
    async fn handle_paste(&mut self, text: &str) -> AppResult<()> {
        let route = self.session.route().clone();
        match self.session.view() {
            ViewState::List(_) => {
                let field = self.form_field;
                if let Some(draft) = self.session.list_mut().and_then(|l| l.form.draft_mut()) {
                    field.value_mut(draft).push_str(text.trim());
                }
            }
            ViewState::Workspace(ws) => match ws.modal.active() {
                Some(WorkspaceModal::MakeDirectory) => self.dir_input.insert_str(text.trim()),
                Some(WorkspaceModal::Upload) => self.upload_input.insert_str(text),
                None => {
                    let paths = parse_dropped_paths(text);
                    if paths.is_empty() {
                        return Ok(());
                    }
                    match load_files(&paths).await {
                        Ok(files) => {
                            let count = files.len();
                            if self.session.drop_files(files).await {
                                self.status_message = Some(format!("Uploaded {} file(s)", count));
                            }
                        }
                        Err(e) => self.status_message = Some(e.to_string()),
                    }
                }
            },
        }
        self.after_action(&route);
        Ok(())
    }

    // ---- shared ----

    fn open(&mut self, target: &str) {
        let result = (self.opener)(target);
        if let Err(e) = &result {
            tracing::warn!("Could not open {}: {}", target, e);
        }
        self.status_message = Some(opener::describe(target, &result));
    }

    /// Reset per-view selection after a route change and keep indices in range
    fn after_action(&mut self, before: &Route) {
        if self.session.route() != before {
            self.file_selected = 0;
            self.context_selected = 0;
            self.file_state = ListState::default();
        }
        self.clamp_selection();
    }

    pub fn clamp_selection(&mut self) {
        let containers = self.session.list().map(|l| l.containers.len()).unwrap_or(0);
        self.selected = self.selected.min(containers.saturating_sub(1));
        self.table_state
            .select((containers > 0).then_some(self.selected));

        let files = self.file_count();
        self.file_selected = self.file_selected.min(files.saturating_sub(1));
        self.file_state.select((files > 0).then_some(self.file_selected));
    }
}

/// Step through the version catalog, wrapping at the ends
fn cycle(options: &[String], current: &str, forward: bool) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let len = options.len();
    let next = match options.iter().position(|o| o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    options[next].clone()
}

fn cycle_difficulty(current: &str, forward: bool) -> String {
    let len = DIFFICULTIES.len() as u8;
    let value = current.trim().parse::<u8>().unwrap_or(1).min(len - 1);
    let next = if forward {
        (value + 1) % len
    } else {
        (value + len - 1) % len
    };
    next.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> Vec<String> {
        vec!["1.9".to_string(), "1.12".to_string(), "1.16".to_string()]
    }

    #[test]
    fn test_cycle_versions() {
        assert_eq!(cycle(&versions(), "1.9", true), "1.12");
        assert_eq!(cycle(&versions(), "1.16", true), "1.9");
        assert_eq!(cycle(&versions(), "1.9", false), "1.16");
        assert_eq!(cycle(&versions(), "custom", true), "1.9");
        assert_eq!(cycle(&[], "1.9", true), "1.9");
    }

    #[test]
    fn test_cycle_difficulty() {
        assert_eq!(cycle_difficulty("1", true), "2");
        assert_eq!(cycle_difficulty("3", true), "0");
        assert_eq!(cycle_difficulty("0", false), "3");
        assert_eq!(cycle_difficulty("junk", true), "2");
    }

    #[test]
    fn test_form_field_order_wraps() {
        assert_eq!(FormField::Name.next(), FormField::Port);
        assert_eq!(FormField::Difficulty.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Difficulty);
    }
}
