/// Tunebox - terminal playback client
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunebox_catalog::MemoryCatalog;
use tunebox_cli::{
    commands::HELP,
    execute, parse_command,
    render::{render_event, render_screen, song_line},
    AppConfig, Flow,
};
use tunebox_core::CatalogProvider;
use tunebox_session::SessionRuntime;

#[derive(Parser)]
#[command(name = "tunebox")]
#[command(about = "Tunebox terminal playback client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive playback session
    Run {
        /// Library file (JSON)
        #[arg(short, long)]
        library: Option<PathBuf>,
    },
    /// Print the songs of a library
    Songs {
        /// Library file (JSON)
        #[arg(short, long)]
        library: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize tracing; stdout belongs to the session screen
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run { library } => {
            let path = library_path(library, &config)?;
            run(&path, config).await?;
        }
        Commands::Songs { library } => {
            let path = library_path(library, &config)?;
            list_songs(&path).await?;
        }
    }

    Ok(())
}

fn library_path(arg: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    arg.or_else(|| config.library.clone())
        .context("no library given (use --library or set TUNEBOX_LIBRARY)")
}

async fn open_catalog(path: &Path) -> anyhow::Result<MemoryCatalog> {
    MemoryCatalog::open(path)
        .await
        .with_context(|| format!("failed to open library {}", path.display()))
}

async fn run(path: &Path, config: AppConfig) -> anyhow::Result<()> {
    let catalog = open_catalog(path).await?;
    tracing::info!("Opened library {}", path.display());

    let mut runtime = SessionRuntime::new(Arc::new(catalog), config.session)?;
    runtime.load().await?;
    print_screen(&mut runtime);
    println!("(type `help` for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if matches!(command, tunebox_cli::ReplCommand::Help) {
            println!("{}", HELP);
            continue;
        }

        match execute(&mut runtime, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                println!("{}", e);
                continue;
            }
        }

        runtime.settle().await;
        print_screen(&mut runtime);
    }

    // Leave the listening history closed on exit
    if runtime.coordinator().player_visible() {
        if let Err(e) = runtime.close().await {
            tracing::warn!("Failed to stop tracking on exit: {}", e);
        }
    }
    tracing::info!("Session ended");
    Ok(())
}

fn print_screen(runtime: &mut SessionRuntime<MemoryCatalog>) {
    for event in runtime.drain_events() {
        if let Some(line) = render_event(&event) {
            println!("* {}", line);
        }
    }
    println!("{}", render_screen(runtime.coordinator()));
}

async fn list_songs(path: &Path) -> anyhow::Result<()> {
    let catalog = open_catalog(path).await?;
    let songs = catalog.songs().await?;

    println!("{} songs", songs.len());
    for song in &songs {
        println!("{}", song_line(song));
    }
    Ok(())
}
