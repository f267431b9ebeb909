//! crafty - Minecraft Server Manager CLI

use clap::{Parser, Subcommand};
use crafty_cli::commands::{self, CreateArgs};
use crafty_config::GlobalConfig;
use crafty_core::Route;
use crafty_gateway::{create_gateway, LifecycleAction};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "crafty")]
#[command(author, version, about = "Minecraft Server Manager", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the configured server URL
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Start the TUI at a route, e.g. '#/workspace/survival?path=mods'
    #[arg(long, value_name = "HASH")]
    route: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List servers
    List,

    /// List available Minecraft versions and difficulties
    Versions,

    /// Create a server
    Create {
        /// Server name (at least 6 characters)
        #[arg(long)]
        name: String,
        /// Host port (10000-40000)
        #[arg(long)]
        port: Option<String>,
        /// Minecraft version (defaults to the configured version)
        #[arg(long = "mc-version", value_name = "VERSION")]
        mc_version: Option<String>,
        /// Forge version
        #[arg(long)]
        forge: Option<String>,
        /// World seed
        #[arg(long)]
        seed: Option<String>,
        /// Difficulty: 0 Peaceful, 1 Easy, 2 Normal, 3 Hard
        #[arg(long, default_value = "1")]
        difficulty: String,
    },

    /// Start a server
    Start {
        /// Server name
        name: String,
    },

    /// Stop a server
    Stop {
        /// Server name
        name: String,
    },

    /// Restart a server
    Restart {
        /// Server name
        name: String,
    },

    /// Remove a server
    Rm {
        /// Server name
        name: String,
    },

    /// List a directory of a server's workspace
    Ls {
        /// Server name
        name: String,
        /// Directory inside the workspace (root if not specified)
        path: Option<String>,
    },

    /// Create a directory in a server's workspace
    Mkdir {
        /// Server name
        name: String,
        /// Name of the new directory
        dir: String,
        /// Parent directory (root if not specified)
        #[arg(long)]
        path: Option<String>,
    },

    /// Upload files into a server's workspace
    Upload {
        /// Server name
        name: String,
        /// Local files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Target directory (root if not specified)
        #[arg(long)]
        path: Option<String>,
    },

    /// Delete a file or directory from a server's workspace
    RmFile {
        /// Server name
        name: String,
        /// Path inside the workspace
        path: String,
    },

    /// Print the download URL of a workspace file or the whole workspace
    Url {
        /// Server name
        name: String,
        /// Path inside the workspace (whole workspace if not specified)
        #[arg(long)]
        path: Option<String>,
    },

    /// Show global configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = GlobalConfig::load().unwrap_or_default();
    if let Some(url) = cli.server {
        config.server.url = url;
    }

    // Doesn't need a server
    if let Some(Commands::Config { init }) = &cli.command {
        return commands::config(&config, *init);
    }

    let Some(command) = cli.command else {
        let initial = match cli.route.as_deref() {
            Some(hash) => Route::parse(hash)?,
            None => Route::List,
        };
        crafty_tui::run(&config, initial).await?;
        return Ok(());
    };

    let gateway = create_gateway(&config)?;
    let gateway = gateway.as_ref();

    match command {
        Commands::List => commands::list(gateway).await?,
        Commands::Versions => commands::versions(gateway).await?,
        Commands::Create {
            name,
            port,
            mc_version,
            forge,
            seed,
            difficulty,
        } => {
            let args = CreateArgs {
                name,
                port,
                version: mc_version,
                forge_version: forge,
                seed,
                difficulty,
            };
            commands::create(gateway, args, &config.ui.default_version).await?;
        }
        Commands::Start { name } => {
            commands::lifecycle(gateway, &name, LifecycleAction::Start).await?
        }
        Commands::Stop { name } => {
            commands::lifecycle(gateway, &name, LifecycleAction::Stop).await?
        }
        Commands::Restart { name } => {
            commands::lifecycle(gateway, &name, LifecycleAction::Restart).await?
        }
        Commands::Rm { name } => commands::remove(gateway, &name).await?,
        Commands::Ls { name, path } => commands::ls(gateway, &name, path.as_deref()).await?,
        Commands::Mkdir { name, dir, path } => {
            commands::mkdir(gateway, &name, path.as_deref(), &dir).await?
        }
        Commands::Upload { name, files, path } => {
            commands::upload(gateway, &name, path.as_deref(), &files).await?
        }
        Commands::RmFile { name, path } => commands::rm_file(gateway, &name, &path).await?,
        Commands::Url { name, path } => commands::url(gateway, &name, path.as_deref()),
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
