//! Workspace view state: listing, modals, context menu, and file mutations
//!
//! Every successful mutation answers with the route of the current
//! directory; following it re-enters the view and re-fetches the listing.
//! Network failures past validation are logged and otherwise silent.

use crate::{
    ContextMenuState, Intent, ModalState, NavigationState, Observable, Route, UploadPipeline,
    WorkspaceModal,
};
use crafty_gateway::{FileEntry, Gateway, MakeDirRequest, UploadFile};

#[derive(Debug)]
pub struct WorkspaceView {
    nav: NavigationState,
    files: Observable<Vec<FileEntry>>,
    pub modal: ModalState<WorkspaceModal>,
    pub context_menu: ContextMenuState,
    /// Input of the make-directory modal
    pub dir_name: String,
    pub uploads: UploadPipeline,
    errors: Vec<String>,
}

impl WorkspaceView {
    /// Empty view for `nav`; nothing is fetched yet
    pub fn new(nav: NavigationState) -> Self {
        Self {
            nav,
            files: Observable::default(),
            modal: ModalState::new(),
            context_menu: ContextMenuState::default(),
            dir_name: String::new(),
            uploads: UploadPipeline::new(),
            errors: Vec::new(),
        }
    }

    /// Build the view from route parameters and fetch its listing
    pub async fn enter(gateway: &dyn Gateway, nav: NavigationState) -> Self {
        let view = Self::new(nav);
        view.load(gateway).await;
        view
    }

    /// Replace the listing with a fresh fetch; failures keep the old one
    pub async fn load(&self, gateway: &dyn Gateway) {
        match gateway
            .list_workspace(&self.nav.container_name, &self.nav.current_path)
            .await
        {
            Ok(files) => self.files.set(files),
            Err(e) => tracing::warn!(
                "Failed to list {}:/{}: {}",
                self.nav.container_name,
                self.nav.current_path,
                e
            ),
        }
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn files(&self) -> &Observable<Vec<FileEntry>> {
        &self.files
    }

    pub fn file(&self, index: usize) -> Option<FileEntry> {
        self.files.get().get(index).cloned()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn open_modal(&mut self, modal: WorkspaceModal) {
        self.errors.clear();
        self.modal.open(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn open_context_menu(&mut self, file: FileEntry, x: u16, y: u16) {
        self.context_menu.open(file, x, y);
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu.close();
    }

    pub fn navigate_into(&self, entry: &FileEntry, gateway: &dyn Gateway) -> Intent {
        self.nav.navigate_into(entry, gateway)
    }

    /// Create `dir_name` inside the current directory
    pub async fn make_dir(&mut self, gateway: &dyn Gateway) -> Option<Route> {
        self.errors.clear();
        if self.dir_name.is_empty() {
            self.errors.push("Invalid directory name".to_string());
            return None;
        }

        let request = MakeDirRequest {
            name: self.dir_name.clone(),
            path: self.nav.current_path.clone(),
        };
        match gateway.make_dir(&self.nav.container_name, &request).await {
            Ok(()) => {
                tracing::info!("Created directory {:?} in {:?}", request.name, request.path);
                Some(self.nav.refresh())
            }
            Err(e) => {
                tracing::warn!("Failed to create directory {:?}: {}", request.name, e);
                None
            }
        }
    }

    /// Upload the staged selection into the current directory
    pub async fn upload(&mut self, gateway: &dyn Gateway) -> Option<Route> {
        self.errors = self.uploads.validate();
        if !self.errors.is_empty() {
            return None;
        }

        let body = self.uploads.assemble(&self.nav.current_path);
        let count = self.uploads.selected().len();
        match gateway.upload(&self.nav.container_name, body).await {
            Ok(()) => {
                tracing::info!("Uploaded {} file(s) to {:?}", count, self.nav.current_path);
                Some(self.nav.refresh())
            }
            Err(e) => {
                tracing::warn!("Upload to {:?} failed: {}", self.nav.current_path, e);
                None
            }
        }
    }

    /// Drag-and-drop: stage and upload in one step, no modal
    pub async fn drop_files(
        &mut self,
        gateway: &dyn Gateway,
        files: Vec<UploadFile>,
    ) -> Option<Route> {
        self.uploads.select(files);
        self.upload(gateway).await
    }

    /// Delete a workspace entry; the context menu closes first
    pub async fn delete(&mut self, gateway: &dyn Gateway, entry: &FileEntry) -> Option<Route> {
        self.close_context_menu();
        match gateway
            .delete_file(&self.nav.container_name, &entry.path)
            .await
        {
            Ok(()) => {
                tracing::info!("Deleted {:?}", entry.path);
                Some(self.nav.refresh())
            }
            Err(e) => {
                tracing::warn!("Failed to delete {:?}: {}", entry.path, e);
                None
            }
        }
    }
}
