//! Opening download targets outside the terminal
//!
//! A download target is handed to the desktop's URL opener. Headless
//! sessions usually have none, so the URL is copied to the clipboard
//! instead and the status line tells the user where it went.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const OPENERS: &[&str] = &["xdg-open", "open"];

const CLIPBOARDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
];

/// How a target was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Opened,
    Copied,
}

/// Status line text for a delivery attempt
pub fn describe(target: &str, result: &Result<Delivery, String>) -> String {
    match result {
        Ok(Delivery::Opened) => format!("Opened {}", target),
        Ok(Delivery::Copied) => format!("Copied {} to clipboard", target),
        Err(_) => format!("Download: {}", target),
    }
}

/// Open `target`, falling back to the clipboard
///
/// Runs on a background thread and waits briefly for the outcome so the
/// UI never blocks on a slow opener.
pub fn open_target(target: &str) -> Result<Delivery, String> {
    let (tx, rx) = mpsc::channel();
    let target = target.to_string();

    thread::spawn(move || {
        let result = open_sync(&target);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(Duration::from_millis(200)) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(Delivery::Opened),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err("Opener thread terminated unexpectedly".to_string())
        }
    }
}

fn open_sync(target: &str) -> Result<Delivery, String> {
    for cmd in OPENERS {
        if !command_exists(cmd) {
            continue;
        }
        let spawned = Command::new(cmd)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => return Ok(Delivery::Opened),
            Err(e) => tracing::debug!("{} failed: {}", cmd, e),
        }
    }

    copy_sync(target).map(|()| Delivery::Copied)
}

fn copy_sync(content: &str) -> Result<(), String> {
    for (cmd, args) in CLIPBOARDS {
        if !command_exists(cmd) {
            continue;
        }
        let Ok(mut child) = Command::new(cmd)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        else {
            continue;
        };
        let written = child
            .stdin
            .take()
            .map(|mut stdin| stdin.write_all(content.as_bytes()).is_ok())
            .unwrap_or(false);
        if written && wait_success(&mut child, Duration::from_secs(5)) {
            return Ok(());
        }
    }

    Err("No opener or clipboard command available".to_string())
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn wait_success(child: &mut std::process::Child, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return status.success(),
            Ok(None) if start.elapsed() > timeout => {
                let _ = child.kill();
                return false;
            }
            Ok(None) => thread::sleep(Duration::from_millis(50)),
            Err(_) => return false,
        }
    }
}
