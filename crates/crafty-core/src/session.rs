//! Route-driven view lifecycle
//!
//! The [`Session`] owns the router and the single active view. Entering a
//! route builds a fresh view state (fetching what it needs); leaving one
//! tears it down, cancelling the list view's poll task. Each entry bumps
//! an epoch so poll results from a torn-down view are discarded.

use crate::{
    spawn_poll, ContainerList, DraftContainer, FormController, Intent, LifecycleDispatcher,
    ListRefresh, NavigationState, PollHandle, Route, Router, WorkspaceView,
};
use crafty_config::GlobalConfig;
use crafty_gateway::{FileEntry, Gateway, UploadFile};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Settings the session needs from the global config
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub poll_interval: Duration,
    pub default_version: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&GlobalConfig::default())
    }
}

impl From<&GlobalConfig> for SessionConfig {
    fn from(config: &GlobalConfig) -> Self {
        Self {
            poll_interval: config.ui.poll_interval(),
            default_version: config.ui.default_version.clone(),
        }
    }
}

/// Modals of the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListModal {
    CreateContainer,
}

/// Container list view state
#[derive(Debug)]
pub struct ListView {
    pub containers: ContainerList,
    pub form: FormController,
    dispatcher: LifecycleDispatcher,
    poll: Option<PollHandle>,
}

impl ListView {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            containers: ContainerList::new(),
            form: FormController::new(),
            dispatcher: LifecycleDispatcher::new(gateway),
            poll: None,
        }
    }

    /// The create form is this view's only modal; it is open while a draft exists
    pub fn modal(&self) -> Option<ListModal> {
        self.form.is_open().then_some(ListModal::CreateContainer)
    }

    pub fn open_create_form(&mut self, default_version: &str) {
        self.form.open(DraftContainer::new(default_version));
    }

    pub fn close_create_form(&mut self) {
        self.form.close();
    }

    pub fn dispatcher(&self) -> &LifecycleDispatcher {
        &self.dispatcher
    }

    pub fn is_polling(&self) -> bool {
        self.poll.as_ref().is_some_and(|p| !p.is_finished())
    }

    fn stop_polling(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.cancel();
        }
    }
}

/// The active top-level view
#[derive(Debug)]
pub enum ViewState {
    List(ListView),
    Workspace(WorkspaceView),
}

/// Router plus the state of the active view
pub struct Session {
    gateway: Arc<dyn Gateway>,
    config: SessionConfig,
    router: Router,
    view: ViewState,
    epoch: u64,
    refresh_tx: mpsc::UnboundedSender<ListRefresh>,
    refresh_rx: mpsc::UnboundedReceiver<ListRefresh>,
}

impl Session {
    /// Start a session and enter `initial`
    pub async fn start(gateway: Arc<dyn Gateway>, config: SessionConfig, initial: Route) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let mut session = Self {
            view: ViewState::List(ListView::new(gateway.clone())),
            gateway,
            config,
            router: Router::new(initial.clone()),
            epoch: 0,
            refresh_tx,
            refresh_rx,
        };
        session.view = session.on_enter(&initial).await;
        session
    }

    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn list(&self) -> Option<&ListView> {
        match &self.view {
            ViewState::List(list) => Some(list),
            ViewState::Workspace(_) => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListView> {
        match &mut self.view {
            ViewState::List(list) => Some(list),
            ViewState::Workspace(_) => None,
        }
    }

    pub fn workspace(&self) -> Option<&WorkspaceView> {
        match &self.view {
            ViewState::Workspace(ws) => Some(ws),
            ViewState::List(_) => None,
        }
    }

    pub fn workspace_mut(&mut self) -> Option<&mut WorkspaceView> {
        match &mut self.view {
            ViewState::Workspace(ws) => Some(ws),
            ViewState::List(_) => None,
        }
    }

    /// Build the state for `route`, fetching its initial data
    async fn on_enter(&mut self, route: &Route) -> ViewState {
        self.epoch += 1;
        tracing::debug!("Entering {} (epoch {})", route, self.epoch);

        match route {
            Route::List => {
                let mut list = ListView::new(self.gateway.clone());
                let (containers, ()) = tokio::join!(
                    list.containers.init_containers(self.gateway.as_ref()),
                    list.form.load_versions(self.gateway.as_ref())
                );
                if let Err(e) = containers {
                    tracing::warn!("Initial container fetch failed: {}", e);
                }
                list.poll = Some(spawn_poll(
                    self.gateway.clone(),
                    self.config.poll_interval,
                    self.epoch,
                    self.refresh_tx.clone(),
                ));
                ViewState::List(list)
            }
            Route::Workspace { name, path } => {
                let nav = NavigationState::new(name.clone(), Some(path.as_str()));
                ViewState::Workspace(WorkspaceView::enter(self.gateway.as_ref(), nav).await)
            }
        }
    }

    /// Tear down a view; in-flight requests are not cancelled
    fn on_exit(state: &mut ViewState) {
        match state {
            ViewState::List(list) => list.stop_polling(),
            ViewState::Workspace(ws) => {
                ws.close_context_menu();
                ws.close_modal();
            }
        }
    }

    /// Change route: exit the current view, then enter the new one.
    /// Navigating to the current route re-enters it.
    pub async fn navigate(&mut self, route: Route) {
        Self::on_exit(&mut self.view);
        self.router.push(route.clone());
        self.view = self.on_enter(&route).await;
    }

    /// Return to the previous route, if there is one
    pub async fn back(&mut self) -> bool {
        let Some(previous) = self.router.back().cloned() else {
            return false;
        };
        Self::on_exit(&mut self.view);
        self.view = self.on_enter(&previous).await;
        true
    }

    /// Act on an intent; returns a target the renderer should open
    pub async fn follow(&mut self, intent: Intent) -> Option<String> {
        match intent {
            Intent::Navigate(route) => {
                self.navigate(route).await;
                None
            }
            Intent::Open(target) => Some(target),
        }
    }

    /// Navigate if an action produced a route; reports whether it did
    async fn follow_route(&mut self, route: Option<Route>) -> bool {
        match route {
            Some(route) => {
                self.navigate(route).await;
                true
            }
            None => false,
        }
    }

    /// Wait for the next poll result
    pub async fn next_refresh(&mut self) -> Option<ListRefresh> {
        self.refresh_rx.recv().await
    }

    /// Apply a poll result if it belongs to the active list view.
    ///
    /// Results are applied in arrival order; an older response arriving
    /// late still overwrites newer data.
    pub fn apply_refresh(&mut self, refresh: ListRefresh) -> bool {
        match &self.view {
            ViewState::List(list) if refresh.epoch == self.epoch => {
                list.containers.replace(refresh.containers);
                true
            }
            _ => {
                tracing::debug!(
                    "Dropping stale poll result (epoch {}, active {})",
                    refresh.epoch,
                    self.epoch
                );
                false
            }
        }
    }

    /// Re-fetch the container list now
    pub async fn refresh_containers(&mut self) {
        let gateway = self.gateway.clone();
        if let Some(list) = self.list_mut() {
            if let Err(e) = list.containers.init_containers(gateway.as_ref()).await {
                tracing::warn!("Container refresh failed: {}", e);
            }
        }
    }

    pub fn open_create_form(&mut self) {
        let version = self.config.default_version.clone();
        if let Some(list) = self.list_mut() {
            list.open_create_form(&version);
        }
    }

    /// Submit the create form; on success the list view is re-entered
    pub async fn submit_create_form(&mut self) {
        let gateway = self.gateway.clone();
        let route = match self.list_mut() {
            Some(list) => list.form.submit(gateway.as_ref()).await,
            None => None,
        };
        self.follow_route(route).await;
    }

    /// Open a container's workspace at its root
    pub async fn open_workspace(&mut self, name: &str) {
        self.navigate(Route::workspace(name, "")).await;
    }

    /// Enter a directory, or return a file's download target
    pub async fn open_entry(&mut self, entry: &FileEntry) -> Option<String> {
        let intent = self.workspace()?.navigate_into(entry, self.gateway.as_ref());
        self.follow(intent).await
    }

    pub async fn up_one_level(&mut self) {
        let route = self.workspace().map(|ws| ws.nav().up_one_level());
        self.follow_route(route).await;
    }

    pub async fn home(&mut self) {
        let route = self.workspace().map(|ws| ws.nav().home());
        self.follow_route(route).await;
    }

    /// Create the typed directory; true once the listing was re-fetched
    pub async fn make_dir(&mut self) -> bool {
        let gateway = self.gateway.clone();
        let route = match self.workspace_mut() {
            Some(ws) => ws.make_dir(gateway.as_ref()).await,
            None => None,
        };
        self.follow_route(route).await
    }

    /// Upload the files staged through the upload modal
    pub async fn upload_selected(&mut self) -> bool {
        let gateway = self.gateway.clone();
        let route = match self.workspace_mut() {
            Some(ws) => ws.upload(gateway.as_ref()).await,
            None => None,
        };
        self.follow_route(route).await
    }

    /// Upload dropped files immediately
    pub async fn drop_files(&mut self, files: Vec<UploadFile>) -> bool {
        let gateway = self.gateway.clone();
        let route = match self.workspace_mut() {
            Some(ws) => ws.drop_files(gateway.as_ref(), files).await,
            None => None,
        };
        self.follow_route(route).await
    }

    /// Delete an entry; false when the server refused or was unreachable
    pub async fn delete_entry(&mut self, entry: &FileEntry) -> bool {
        let gateway = self.gateway.clone();
        let route = match self.workspace_mut() {
            Some(ws) => ws.delete(gateway.as_ref(), entry).await,
            None => None,
        };
        self.follow_route(route).await
    }

    /// Download target of a workspace entry
    pub fn download_target(&self, entry: &FileEntry) -> Option<String> {
        self.workspace()
            .map(|ws| ws.nav().download_target(entry, self.gateway.as_ref()))
    }
}
