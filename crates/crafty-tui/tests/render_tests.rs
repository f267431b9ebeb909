//! Rendering tests against a TestBackend

mod helpers;

use crafty_core::Route;
use crafty_gateway::test_support::{mock_container, MockGateway};
use crafty_gateway::{ContainerState, FileEntry};
use crafty_tui::App;
use crossterm::event::KeyCode;
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
                    FileEntry::dir("config", "mods/config"),
                ],
            ),
    )
}

#[tokio::test]
async fn test_list_renders_containers() {
    let mut app = App::new_for_testing(gateway(), Route::List).await;
    let output = render_app(&mut app, 120, 24);

    assert!(output.contains("crafty - Minecraft Server Manager"));
    assert!(output.contains("Servers"));
    assert!(output.contains("survival"));
    assert!(output.contains("creative"));
    assert!(output.contains("Running"));
    assert!(output.contains("25565"));
    assert!(output.contains("n: New"));
}

#[tokio::test]
async fn test_empty_list_hint() {
    let mut app = App::new_for_testing(Arc::new(MockGateway::new()), Route::List).await;
    let output = render_app(&mut app, 80, 24);

    assert!(output.contains("No servers yet."));
    assert!(output.contains("n: New  r: Refresh  q: Quit"));
}

#[tokio::test]
async fn test_create_form_shows_errors_in_order() {
    let mut app = App::new_for_testing(gateway(), Route::List).await;
    app.send_key(KeyCode::Char('n')).await.unwrap();
    app.send_key(KeyCode::Tab).await.unwrap();
    for c in "99".chars() {
        app.send_key(KeyCode::Char(c)).await.unwrap();
    }
    app.send_key(KeyCode::Enter).await.unwrap();

    let output = render_app(&mut app, 100, 30);
    assert!(output.contains("New server"));
    assert!(output.contains("Easy"));
    let name_err = output.find("Invalid server name").unwrap();
    let port_err = output.find("Invalid port").unwrap();
    assert!(name_err < port_err);
}

#[tokio::test]
async fn test_workspace_renders_breadcrumbs_and_entries() {
    let mut app = App::new_for_testing(gateway(), Route::workspace("survival", "mods")).await;
    let output = render_app(&mut app, 100, 24);

    assert!(output.contains("Servers › survival › mods"));
    assert!(output.contains("survival:/mods"));
    assert!(output.contains("config/"));
    assert!(output.contains("u: Up"));
}

#[tokio::test]
async fn test_workspace_root_hides_up_hint() {
    let mut app = App::new_for_testing(gateway(), Route::workspace("survival", "")).await;
    let output = render_app(&mut app, 120, 24);

    assert!(output.contains("mods/"));
    assert!(output.contains("server.properties"));
    assert!(!output.contains("u: Up"));
}

#[tokio::test]
async fn test_context_menu_renders_at_click() {
    let mut app = App::new_for_testing(gateway(), Route::workspace("survival", "")).await;
    render_app(&mut app, 80, 24);
    let entry = app.session.workspace().unwrap().file(1).unwrap();
    app.session
        .workspace_mut()
        .unwrap()
        .open_context_menu(entry, 30, 6);

    let output = render_app(&mut app, 80, 24);
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[7].contains("Download"));
    assert!(lines[8].contains("Delete"));
}

#[tokio::test]
async fn test_make_dir_modal_renders_input() {
    let mut app = App::new_for_testing(gateway(), Route::workspace("survival", "")).await;
    app.send_key(KeyCode::Char('m')).await.unwrap();
    for c in "world".chars() {
        app.send_key(KeyCode::Char(c)).await.unwrap();
    }

    let output = render_app(&mut app, 80, 24);
    assert!(output.contains("New directory"));
    assert!(output.contains("world"));
}

#[tokio::test]
async fn test_back_hint_only_with_history() {
    let mut app = App::new_for_testing(gateway(), Route::List).await;
    assert!(!render_app(&mut app, 120, 24).contains("b: Back"));

    app.send_key(KeyCode::Enter).await.unwrap();
    let output = render_app(&mut app, 120, 24);
    assert!(output.contains("survival:/"));
    assert!(output.contains("b: Back"));
}
