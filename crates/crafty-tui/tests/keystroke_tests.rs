//! Integration tests that drive the App through keys, mouse and paste

mod helpers;

use crafty_core::{Route, WorkspaceModal};
use crafty_gateway::test_support::{mock_container, MockCall, MockGateway, MockOp};
use crafty_gateway::{ContainerState, FileEntry, GatewayError, LifecycleAction};
use crafty_tui::{App, Event, FormField};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use helpers::render_app;
use std::sync::Arc;

fn gateway() -> Arc<MockGateway> {
    Arc::new(
        MockGateway::new()
            .with_containers(vec![
                mock_container("survival", ContainerState::Running),
                mock_container("creative", ContainerState::Stopped),
            ])
            .with_files(
                "survival",
                vec![
                    FileEntry::dir("mods", "mods"),
                    FileEntry::file("server.properties", "server.properties"),
                    FileEntry::file("fabric.jar", "mods/fabric.jar"),
                ],
            ),
    )
}

async fn list_app(gw: &Arc<MockGateway>) -> App {
    App::new_for_testing(gw.clone(), Route::List).await
}

async fn workspace_app(gw: &Arc<MockGateway>) -> App {
    App::new_for_testing(gw.clone(), Route::workspace("survival", "")).await
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.send_key(KeyCode::Char(c)).await.unwrap();
    }
}

fn click(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn file_names(app: &App) -> Vec<String> {
    app.session
        .workspace()
        .unwrap()
        .files()
        .snapshot()
        .into_iter()
        .map(|f| f.name)
        .collect()
}

/// Let spawned fire-and-forget requests run
async fn settle(gw: &MockGateway, call: &MockCall) -> bool {
    for _ in 0..20 {
        if gw.was_called(call) {
            return true;
        }
        tokio::task::yield_now().await;
    }
    false
}

// ---------------------------------------------------------------------------
// Container list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_selection_wraps_around() {
    let gw = gateway();
    let mut app = list_app(&gw).await;
    assert_eq!(app.selected, 0);

    app.send_key(KeyCode::Char('j')).await.unwrap();
    assert_eq!(app.selected, 1);
    app.send_key(KeyCode::Char('j')).await.unwrap();
    assert_eq!(app.selected, 0);
    app.send_key(KeyCode::Char('k')).await.unwrap();
    assert_eq!(app.selected, 1);
    assert_eq!(app.table_state.selected(), Some(1));
}

#[tokio::test]
async fn test_lifecycle_keys_dispatch_requests() {
    let gw = gateway();
    let mut app = list_app(&gw).await;

    app.send_key(KeyCode::Char('x')).await.unwrap();
    assert_eq!(app.status_message.as_deref(), Some("Stopping survival..."));
    assert!(
        settle(
            &gw,
            &MockCall::Action {
                name: "survival".into(),
                action: LifecycleAction::Stop
            }
        )
        .await
    );

    app.send_key(KeyCode::Char('j')).await.unwrap();
    app.send_key(KeyCode::Char('d')).await.unwrap();
    assert!(
        settle(
            &gw,
            &MockCall::Remove {
                name: "creative".into()
            }
        )
        .await
    );
}

#[tokio::test]
async fn test_create_form_round_trip() {
    let gw = gateway();
    let mut app = list_app(&gw).await;

    app.send_key(KeyCode::Char('n')).await.unwrap();
    assert!(app.form_open());
    assert_eq!(app.form_field, FormField::Name);
    type_text(&mut app, "mc-test").await;

    // Name -> Port -> Version, then pick the next catalog entry
    app.send_key(KeyCode::Tab).await.unwrap();
    type_text(&mut app, "25000").await;
    app.send_key(KeyCode::Tab).await.unwrap();
    app.send_key(KeyCode::Right).await.unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();

    assert!(!app.form_open());
    assert_eq!(app.status_message.as_deref(), Some("Created mc-test"));
    let created = gw
        .get_calls()
        .into_iter()
        .find_map(|c| match c {
            MockCall::CreateContainer(request) => Some(request),
            _ => None,
        })
        .unwrap();
    assert_eq!(created.name, "mc-test");
    assert_eq!(created.port, "25000");
    assert_eq!(created.version, "1.12");
    assert_eq!(created.difficulty, 1);

    let names: Vec<String> = app
        .session
        .list()
        .unwrap()
        .containers
        .containers()
        .snapshot()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert!(names.contains(&"mc-test".to_string()));
}

#[tokio::test]
async fn test_short_name_is_rejected_locally() {
    let gw = gateway();
    let mut app = list_app(&gw).await;

    app.send_key(KeyCode::Char('n')).await.unwrap();
    type_text(&mut app, "abc").await;
    app.send_key(KeyCode::Enter).await.unwrap();

    assert!(app.form_open());
    assert_eq!(
        app.session.list().unwrap().form.errors(),
        ["Invalid server name"]
    );
    assert_eq!(
        gw.count_calls(|c| matches!(c, MockCall::CreateContainer(_))),
        0
    );

    app.send_key(KeyCode::Esc).await.unwrap();
    assert!(!app.form_open());
}

#[tokio::test]
async fn test_download_archive_key() {
    let gw = gateway();
    let mut app = list_app(&gw).await;

    app.send_key(KeyCode::Char('D')).await.unwrap();
    assert_eq!(
        app.status_message.as_deref(),
        Some("Copied http://mock/workspace/survival/file to clipboard")
    );
    assert_eq!(app.session.route(), &Route::List);
}

#[tokio::test]
async fn test_enter_opens_workspace_and_q_quits() {
    let gw = gateway();
    let mut app = list_app(&gw).await;

    app.send_key(KeyCode::Enter).await.unwrap();
    assert_eq!(app.session.route(), &Route::workspace("survival", ""));
    assert_eq!(file_names(&app), vec!["mods", "server.properties"]);

    app.send_key(KeyCode::Char('q')).await.unwrap();
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_back_key_returns_to_previous_route() {
    let gw = gateway();
    let mut app = list_app(&gw).await;

    // Nothing to go back to yet
    app.send_key(KeyCode::Char('b')).await.unwrap();
    assert_eq!(app.session.route(), &Route::List);

    app.send_key(KeyCode::Enter).await.unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();
    assert_eq!(app.session.route(), &Route::workspace("survival", "mods"));

    app.send_key(KeyCode::Char('b')).await.unwrap();
    assert_eq!(app.session.route(), &Route::workspace("survival", ""));
    assert_eq!(file_names(&app), vec!["mods", "server.properties"]);

    app.send_key(KeyCode::Char('b')).await.unwrap();
    assert_eq!(app.session.route(), &Route::List);
    assert!(app.session.list().unwrap().is_polling());
    assert!(!app.session.router().can_go_back());
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_directory_navigation_keys() {
    let gw = gateway();
    let mut app = workspace_app(&gw).await;

    app.send_key(KeyCode::Enter).await.unwrap();
    assert_eq!(app.session.route(), &Route::workspace("survival", "mods"));
    assert_eq!(file_names(&app), vec!["fabric.jar"]);

    app.send_key(KeyCode::Backspace).await.unwrap();
    assert_eq!(app.session.route(), &Route::workspace("survival", ""));

    app.send_key(KeyCode::Char('h')).await.unwrap();
    assert_eq!(app.session.route(), &Route::List);
}

#[tokio::test]
async fn test_enter_on_file_opens_download_target() {
    let gw = gateway();
    let mut app = workspace_app(&gw).await;

    app.send_key(KeyCode::Char('j')).await.unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();

    assert_eq!(
        app.status_message.as_deref(),
        Some("Copied http://mock/workspace/survival/file?path=server.properties to clipboard")
    );
    assert_eq!(app.session.route(), &Route::workspace("survival", ""));
}

#[tokio::test]
async fn test_make_directory_modal() {
    let gw = gateway();
    let mut app = workspace_app(&gw).await;

    app.send_key(KeyCode::Char('m')).await.unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();
    let ws = app.session.workspace().unwrap();
    assert!(ws.modal.is_showing(&WorkspaceModal::MakeDirectory));
    assert_eq!(ws.errors(), ["Invalid directory name"]);

    type_text(&mut app, "plugins").await;
    app.send_key(KeyCode::Enter).await.unwrap();

    assert!(!app.session.workspace().unwrap().modal.is_open());
    assert!(file_names(&app).contains(&"plugins".to_string()));
}

#[tokio::test]
async fn test_upload_modal_requires_files() {
    let gw = gateway();
    let mut app = workspace_app(&gw).await;

    app.send_key(KeyCode::Char('U')).await.unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();

    let ws = app.session.workspace().unwrap();
    assert!(ws.modal.is_showing(&WorkspaceModal::Upload));
    assert_eq!(ws.errors(), ["Invalid file"]);
    assert_eq!(gw.count_calls(|c| matches!(c, MockCall::Upload { .. })), 0);
}

#[tokio::test]
async fn test_upload_modal_uploads_typed_paths() {
    let gw = gateway();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("ops.json");
    std::fs::write(&path, b"[]").unwrap();

    let mut app = workspace_app(&gw).await;
    app.send_key(KeyCode::Char('U')).await.unwrap();
    app.handle_event(Event::Paste(path.display().to_string()))
        .await
        .unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();

    assert!(!app.session.workspace().unwrap().modal.is_open());
    assert!(file_names(&app).contains(&"ops.json".to_string()));
}

#[tokio::test]
async fn test_paste_on_listing_uploads_immediately() {
    let gw = gateway();
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a.jar");
    let b = tmp.path().join("b.jar");
    std::fs::write(&a, b"a").unwrap();
    std::fs::write(&b, b"b").unwrap();

    let mut app = App::new_for_testing(gw.clone(), Route::workspace("survival", "mods")).await;
    let pasted = format!("{} {}", a.display(), b.display());
    app.handle_event(Event::Paste(pasted)).await.unwrap();

    let body = gw
        .get_calls()
        .into_iter()
        .find_map(|c| match c {
            MockCall::Upload { body, .. } => Some(body),
            _ => None,
        })
        .unwrap();
    assert_eq!(body.part_names(), vec!["file0", "file1", "path"]);
    assert_eq!(body.text("path"), Some("mods"));
    assert_eq!(file_names(&app), vec!["fabric.jar", "a.jar", "b.jar"]);
    assert_eq!(app.status_message.as_deref(), Some("Uploaded 2 file(s)"));
}

#[tokio::test]
async fn test_paste_of_missing_file_reports_error() {
    let gw = gateway();
    let mut app = workspace_app(&gw).await;

    app.handle_event(Event::Paste("/definitely/not/here.jar".into()))
        .await
        .unwrap();

    assert!(app
        .status_message
        .as_deref()
        .unwrap()
        .contains("/definitely/not/here.jar"));
    assert_eq!(gw.count_calls(|c| matches!(c, MockCall::Upload { .. })), 0);
}

#[tokio::test]
async fn test_right_click_menu_delete() {
    let gw = gateway();
    let mut app = workspace_app(&gw).await;
    render_app(&mut app, 80, 24);

    // Second row of the listing is server.properties
    let row = app.files_area.y + 1;
    app.handle_event(click(MouseEventKind::Down(MouseButton::Right), 10, row))
        .await
        .unwrap();
    let menu = app
        .session
        .workspace()
        .unwrap()
        .context_menu
        .get()
        .cloned()
        .unwrap();
    assert_eq!(menu.file.name, "server.properties");
    assert_eq!((menu.x, menu.y), (10, row));

    app.send_key(KeyCode::Char('j')).await.unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();

    assert!(!app.session.workspace().unwrap().context_menu.is_open());
    assert_eq!(file_names(&app), vec!["mods"]);
}

#[tokio::test]
async fn test_failed_delete_keeps_listing_and_reports_nothing() {
    let gw = gateway();
    gw.fail(MockOp::DeleteFile, GatewayError::Server("locked".into()));
    let mut app = workspace_app(&gw).await;
    render_app(&mut app, 80, 24);

    let row = app.files_area.y + 1;
    app.handle_event(click(MouseEventKind::Down(MouseButton::Right), 10, row))
        .await
        .unwrap();
    app.send_key(KeyCode::Char('j')).await.unwrap();
    app.send_key(KeyCode::Enter).await.unwrap();

    assert!(gw.was_called(&MockCall::DeleteFile {
        name: "survival".into(),
        path: "server.properties".into(),
    }));
    assert!(!app.session.workspace().unwrap().context_menu.is_open());
    assert_eq!(file_names(&app), vec!["mods", "server.properties"]);
    assert_eq!(app.status_message, None);
}

#[tokio::test]
async fn test_failed_paste_upload_reports_nothing() {
    let gw = gateway();
    gw.fail(MockOp::Upload, GatewayError::Connection("refused".into()));
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a.jar");
    std::fs::write(&a, b"a").unwrap();

    let mut app = App::new_for_testing(gw.clone(), Route::workspace("survival", "mods")).await;
    app.handle_event(Event::Paste(a.display().to_string()))
        .await
        .unwrap();

    assert_eq!(gw.count_calls(|c| matches!(c, MockCall::Upload { .. })), 1);
    assert_eq!(file_names(&app), vec!["fabric.jar"]);
    assert_eq!(app.status_message, None);
}

#[tokio::test]
async fn test_click_on_menu_item_and_elsewhere() {
    let gw = gateway();
    let mut app = workspace_app(&gw).await;
    render_app(&mut app, 80, 24);
    let row = app.files_area.y;

    // Left-click outside the menu closes it
    app.handle_event(click(MouseEventKind::Down(MouseButton::Right), 10, row))
        .await
        .unwrap();
    app.handle_event(click(MouseEventKind::Down(MouseButton::Left), 60, 20))
        .await
        .unwrap();
    assert!(!app.session.workspace().unwrap().context_menu.is_open());

    // Right-click below the listing closes it too
    app.handle_event(click(MouseEventKind::Down(MouseButton::Right), 10, row))
        .await
        .unwrap();
    app.handle_event(click(MouseEventKind::Down(MouseButton::Right), 10, 19))
        .await
        .unwrap();
    assert!(!app.session.workspace().unwrap().context_menu.is_open());

    // First item of a menu opened at (10, row) sits one row below its top border
    app.handle_event(click(MouseEventKind::Down(MouseButton::Right), 10, row))
        .await
        .unwrap();
    app.handle_event(click(MouseEventKind::Down(MouseButton::Left), 12, row + 1))
        .await
        .unwrap();
    assert_eq!(
        app.status_message.as_deref(),
        Some("Copied http://mock/workspace/survival/file?path=mods to clipboard")
    );
    assert!(!app.session.workspace().unwrap().context_menu.is_open());
}
