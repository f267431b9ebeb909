//! CLI command implementations
//!
//! One-shot commands drive the same core controllers as the TUI, but
//! await every request and turn failures into errors.

use anyhow::{bail, Context, Result};
use crafty_config::GlobalConfig;
use crafty_core::{
    load_files, validate, DraftContainer, FileEntry, FormController, NavigationState,
    WorkspaceView, DIFFICULTIES,
};
use crafty_gateway::{Container, ContainerState, Gateway, LifecycleAction};
use std::path::PathBuf;

/// Fields of a container to create, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub name: String,
    pub port: Option<String>,
    pub version: Option<String>,
    pub forge_version: Option<String>,
    pub seed: Option<String>,
    pub difficulty: String,
}

impl CreateArgs {
    fn into_draft(self, default_version: &str) -> DraftContainer {
        let mut draft = DraftContainer::new(default_version);
        draft.name = self.name;
        draft.port = self.port.unwrap_or_default();
        if let Some(version) = self.version {
            draft.version = version;
        }
        draft.forge_version = self.forge_version.unwrap_or_default();
        draft.seed = self.seed.unwrap_or_default();
        draft.difficulty = self.difficulty;
        draft
    }
}

fn state_symbol(state: &ContainerState) -> &'static str {
    match state {
        ContainerState::Running => "●",
        ContainerState::Paused => "◐",
        ContainerState::Restarting => "◌",
        ContainerState::Stopped => "○",
        ContainerState::Unknown(_) => "?",
    }
}

/// Render the container table
pub fn format_containers(containers: &[Container]) -> String {
    const NAME_WIDTH: usize = 24;
    const STATE_WIDTH: usize = 12;
    const VERSION_WIDTH: usize = 10;
    const FORGE_WIDTH: usize = 14;

    let mut out = format!(
        "  {:<NAME_WIDTH$} {:<STATE_WIDTH$} {:<VERSION_WIDTH$} {:<FORGE_WIDTH$} PORTS\n",
        "NAME", "STATE", "VERSION", "FORGE"
    );
    out.push_str(&"-".repeat(75));
    out.push('\n');

    for c in containers {
        let forge = if c.has_forge() { c.forge_version.as_str() } else { "-" };
        out.push_str(&format!(
            "{} {:<NAME_WIDTH$} {:<STATE_WIDTH$} {:<VERSION_WIDTH$} {:<FORGE_WIDTH$} {}\n",
            state_symbol(&c.state),
            c.name,
            c.state.to_string(),
            c.version,
            forge,
            c.ports.join(", ")
        ));
    }
    out
}

/// Render a directory listing; directories get a trailing slash
pub fn format_listing(files: &[FileEntry]) -> String {
    files
        .iter()
        .map(|f| {
            if f.is_dir {
                format!("{}/\n", f.name)
            } else {
                format!("{}\n", f.name)
            }
        })
        .collect()
}

/// List containers
pub async fn list(gateway: &dyn Gateway) -> Result<()> {
    let containers = gateway
        .list_containers()
        .await
        .context("Failed to list servers")?;

    if containers.is_empty() {
        println!("No servers found.");
        println!("\nUse 'crafty create --name <NAME>' to create one.");
        return Ok(());
    }

    print!("{}", format_containers(&containers));
    Ok(())
}

/// List the versions the server can run, and the difficulty catalog
pub async fn versions(gateway: &dyn Gateway) -> Result<()> {
    let versions = gateway
        .list_versions()
        .await
        .context("Failed to list versions")?;

    println!("Versions:");
    for version in versions {
        println!("  {}", version);
    }
    println!("\nDifficulties:");
    for (value, label) in DIFFICULTIES {
        println!("  {} {}", value, label);
    }
    Ok(())
}

/// Validate and create a container
pub async fn create(gateway: &dyn Gateway, args: CreateArgs, default_version: &str) -> Result<()> {
    let draft = args.into_draft(default_version);
    let name = draft.name.clone();

    let errors = validate(&draft);
    if !errors.is_empty() {
        bail!("{}", errors.join("\n"));
    }

    let mut form = FormController::new();
    form.open(draft);
    if form.submit(gateway).await.is_some() {
        println!("Created server '{}'", name);
        return Ok(());
    }
    if !form.errors().is_empty() {
        bail!("{}", form.errors().join("\n"));
    }
    println!("Server '{}' accepted; it will appear once the server reports it", name);
    Ok(())
}

/// Start, stop or restart a container and wait for the server to answer
pub async fn lifecycle(gateway: &dyn Gateway, name: &str, action: LifecycleAction) -> Result<()> {
    gateway
        .container_action(name, action)
        .await
        .with_context(|| format!("Failed to {} '{}'", action, name))?;
    println!("Requested {} of '{}'", action, name);
    Ok(())
}

pub async fn remove(gateway: &dyn Gateway, name: &str) -> Result<()> {
    gateway
        .remove_container(name)
        .await
        .with_context(|| format!("Failed to remove '{}'", name))?;
    println!("Removed '{}'", name);
    Ok(())
}

/// List one directory of a container's workspace
pub async fn ls(gateway: &dyn Gateway, name: &str, path: Option<&str>) -> Result<()> {
    let nav = NavigationState::new(name, path);
    let files = gateway
        .list_workspace(&nav.container_name, &nav.current_path)
        .await
        .with_context(|| format!("Failed to list {}:/{}", name, nav.current_path))?;

    if files.is_empty() {
        println!("(empty)");
    } else {
        print!("{}", format_listing(&files));
    }
    Ok(())
}

/// Create `dir` inside `path`
pub async fn mkdir(gateway: &dyn Gateway, name: &str, path: Option<&str>, dir: &str) -> Result<()> {
    let mut view = WorkspaceView::new(NavigationState::new(name, path));
    view.dir_name = dir.to_string();

    match view.make_dir(gateway).await {
        Some(_) => {
            println!("Created {}:/{}", name, join(&view.nav().current_path, dir));
            Ok(())
        }
        None if !view.errors().is_empty() => bail!("{}", view.errors().join("\n")),
        None => bail!("Failed to create directory '{}'", dir),
    }
}

/// Upload local files into `path`
pub async fn upload(
    gateway: &dyn Gateway,
    name: &str,
    path: Option<&str>,
    files: &[PathBuf],
) -> Result<()> {
    let files = load_files(files).await?;
    let count = files.len();

    let mut view = WorkspaceView::new(NavigationState::new(name, path));
    view.uploads.select(files);
    match view.upload(gateway).await {
        Some(_) => {
            println!(
                "Uploaded {} file(s) to {}:/{}",
                count,
                name,
                view.nav().current_path
            );
            Ok(())
        }
        None if !view.errors().is_empty() => bail!("{}", view.errors().join("\n")),
        None => bail!("Upload to '{}' failed", name),
    }
}

/// Delete a workspace file or directory
pub async fn rm_file(gateway: &dyn Gateway, name: &str, path: &str) -> Result<()> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let entry = FileEntry::file(file_name, path);

    let mut view = WorkspaceView::new(NavigationState::new(name, None));
    match view.delete(gateway, &entry).await {
        Some(_) => {
            println!("Deleted {}:/{}", name, path);
            Ok(())
        }
        None => bail!("Failed to delete '{}'", path),
    }
}

/// Print the download target of a file, or of the whole workspace
pub fn url(gateway: &dyn Gateway, name: &str, path: Option<&str>) {
    println!("{}", gateway.download_url(name, path));
}

/// Show the effective configuration, optionally writing defaults first
pub fn config(config: &GlobalConfig, init: bool) -> Result<()> {
    let config_path = GlobalConfig::config_path()?;

    if init {
        if config_path.exists() {
            println!("Config already exists at {:?}", config_path);
        } else {
            GlobalConfig::default().save_to(&config_path)?;
            println!("Created default config at {:?}", config_path);
        }
        return Ok(());
    }

    if config_path.exists() {
        println!("# Config file: {:?}\n", config_path);
    } else {
        println!("# Config file: {:?} (not created yet)\n", config_path);
    }
    println!("{}", render_config(config)?);
    Ok(())
}

/// Effective configuration as TOML, with the password masked
pub fn render_config(config: &GlobalConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.server.password.is_some() {
        shown.server.password = Some("********".to_string());
    }
    Ok(toml::to_string_pretty(&shown)?)
}

fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent, child)
    }
}
