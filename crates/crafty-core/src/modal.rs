//! Single-slot transient UI state: modals and the context menu

use crafty_gateway::FileEntry;

/// Holds at most one active value
///
/// Each view owns exactly one slot per surface, so opening one modal
/// implicitly replaces any other modal of that view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    active: Option<T>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, value: T) {
        self.active = Some(value);
    }

    /// Closing an empty slot is a no-op
    pub fn close(&mut self) -> Option<T> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&T> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }
}

impl<T: PartialEq> Slot<T> {
    pub fn is_showing(&self, value: &T) -> bool {
        self.active.as_ref() == Some(value)
    }
}

/// Modals of the workspace view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceModal {
    MakeDirectory,
    Upload,
}

pub type ModalState<K> = Slot<K>;

/// Context menu anchored at a screen position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub file: FileEntry,
    pub x: u16,
    pub y: u16,
}

/// At most one context menu open at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenuState {
    slot: Slot<ContextMenu>,
}

impl ContextMenuState {
    pub fn open(&mut self, file: FileEntry, x: u16, y: u16) {
        self.slot.open(ContextMenu { file, x, y });
    }

    pub fn close(&mut self) {
        self.slot.close();
    }

    pub fn get(&self) -> Option<&ContextMenu> {
        self.slot.active()
    }

    pub fn is_open(&self) -> bool {
        self.slot.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_replaces_active_modal() {
        let mut modal = ModalState::new();
        modal.open(WorkspaceModal::MakeDirectory);
        modal.open(WorkspaceModal::Upload);
        assert!(modal.is_showing(&WorkspaceModal::Upload));
        assert!(!modal.is_showing(&WorkspaceModal::MakeDirectory));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut modal: ModalState<WorkspaceModal> = ModalState::new();
        assert_eq!(modal.close(), None);
        modal.open(WorkspaceModal::Upload);
        assert_eq!(modal.close(), Some(WorkspaceModal::Upload));
        assert_eq!(modal.close(), None);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_context_menu_single_instance() {
        let mut menu = ContextMenuState::default();
        menu.open(FileEntry::file("a.jar", "a.jar"), 3, 4);
        menu.open(FileEntry::file("b.jar", "b.jar"), 10, 12);

        let open = menu.get().unwrap();
        assert_eq!(open.file.name, "b.jar");
        assert_eq!((open.x, open.y), (10, 12));

        menu.close();
        menu.close();
        assert!(!menu.is_open());
    }
}
