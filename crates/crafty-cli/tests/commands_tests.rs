//! Command tests against the in-memory gateway

use crafty_cli::commands::{self, CreateArgs};
use crafty_gateway::test_support::{mock_container, MockCall, MockGateway, MockOp};
use crafty_gateway::{ContainerState, FileEntry, GatewayError, Gateway, LifecycleAction};

fn gateway() -> MockGateway {
    MockGateway::new()
        .with_containers(vec![mock_container("survival", ContainerState::Stopped)])
        .with_files(
            "survival",
            vec![
                FileEntry::dir("mods", "mods"),
                FileEntry::file("jei.jar", "mods/jei.jar"),
            ],
        )
}

#[tokio::test]
async fn test_create_sends_numeric_difficulty() {
    let gw = gateway();
    let args = CreateArgs {
        name: "mc-test".into(),
        port: Some("25566".into()),
        difficulty: "3".into(),
        ..Default::default()
    };
    commands::create(&gw, args, "1.12").await.unwrap();

    let calls = gw.get_calls();
    let MockCall::CreateContainer(request) = &calls[0] else {
        panic!("expected a create call, got {:?}", calls);
    };
    assert_eq!(request.name, "mc-test");
    assert_eq!(request.version, "1.12");
    assert_eq!(request.difficulty, 3);
}

#[tokio::test]
async fn test_create_invalid_draft_makes_no_call() {
    let gw = gateway();
    let args = CreateArgs {
        name: "abc".into(),
        difficulty: "1".into(),
        ..Default::default()
    };
    let err = commands::create(&gw, args, "1.12").await.unwrap_err();
    assert!(err.to_string().contains("Invalid server name"));
    assert!(gw.get_calls().is_empty());
}

#[tokio::test]
async fn test_create_reports_server_error() {
    let gw = gateway();
    gw.fail(
        MockOp::CreateContainer,
        GatewayError::Server("Port already in use".into()),
    );
    let args = CreateArgs {
        name: "mc-test".into(),
        difficulty: "1".into(),
        ..Default::default()
    };
    let err = commands::create(&gw, args, "1.12").await.unwrap_err();
    assert!(err.to_string().contains("Port already in use"));
}

#[tokio::test]
async fn test_lifecycle_awaits_server() {
    let gw = gateway();
    commands::lifecycle(&gw, "survival", LifecycleAction::Start)
        .await
        .unwrap();
    assert!(gw.was_called(&MockCall::Action {
        name: "survival".into(),
        action: LifecycleAction::Start,
    }));
    assert!(gw.list_containers().await.unwrap()[0].is_running());
}

#[tokio::test]
async fn test_lifecycle_failure_is_an_error() {
    let gw = gateway();
    gw.fail(MockOp::Action, GatewayError::Timeout);
    let err = commands::lifecycle(&gw, "survival", LifecycleAction::Stop)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to stop 'survival'"));
}

#[tokio::test]
async fn test_remove() {
    let gw = gateway();
    commands::remove(&gw, "survival").await.unwrap();
    assert!(gw.list_containers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mkdir_in_subdirectory() {
    let gw = gateway();
    commands::mkdir(&gw, "survival", Some("mods"), "config")
        .await
        .unwrap();
    assert!(gw.was_called(&MockCall::MakeDir {
        name: "survival".into(),
        request: crafty_gateway::MakeDirRequest {
            name: "config".into(),
            path: "mods".into(),
        },
    }));
}

#[tokio::test]
async fn test_mkdir_empty_name_fails() {
    let gw = gateway();
    let err = commands::mkdir(&gw, "survival", None, "").await.unwrap_err();
    assert!(err.to_string().contains("Invalid directory name"));
    assert!(gw.get_calls().is_empty());
}

#[tokio::test]
async fn test_upload_reads_local_files() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("ops.json");
    std::fs::write(&file, b"[]").unwrap();

    let gw = gateway();
    commands::upload(&gw, "survival", Some("mods"), &[file])
        .await
        .unwrap();

    let files = gw.list_workspace("survival", "mods").await.unwrap();
    assert!(files.iter().any(|f| f.path == "mods/ops.json"));
}

#[tokio::test]
async fn test_upload_missing_file_fails_before_request() {
    let tmp = tempfile::tempdir().unwrap();
    let gw = gateway();
    let err = commands::upload(&gw, "survival", None, &[tmp.path().join("missing.jar")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("missing.jar"));
    assert!(gw.get_calls().is_empty());
}

#[tokio::test]
async fn test_rm_file_removes_subtree() {
    let gw = gateway();
    commands::rm_file(&gw, "survival", "mods").await.unwrap();
    assert!(gw.list_workspace("survival", "").await.unwrap().is_empty());
    assert!(gw.list_workspace("survival", "mods").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ls_failure_is_an_error() {
    let gw = gateway();
    gw.fail(MockOp::ListWorkspace, GatewayError::Connection("refused".into()));
    assert!(commands::ls(&gw, "survival", None).await.is_err());
}
