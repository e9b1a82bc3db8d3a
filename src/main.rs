use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use contenthub::app::{App, AppEvent};
use contenthub::config::Config;
use contenthub::content::MockContentSource;
use contenthub::state::{clear_persisted, FavoritesStore, PreferencesStore};
use contenthub::storage::{Database, KeyValueStore, MemoryStore, StorageError};
use contenthub::{logging, ui};

/// Get the config directory path (~/.config/contenthub/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("contenthub"))
}

#[derive(Parser, Debug)]
#[command(
    name = "contenthub",
    version,
    about = "Terminal dashboard for news, movies and social content"
)]
struct Args {
    /// Config file (default: ~/.config/contenthub/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Delete stored preferences and favorites before starting
    #[arg(long)]
    reset: bool,

    /// Keep preferences and favorites in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Items per fetched page (overrides the config file)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    page_size: Option<u16>,
}

/// Unwrap a store load, turning malformed data into a hint about `--reset`.
fn or_reset_hint<T>(result: Result<T, StorageError>, what: &str) -> Result<T> {
    result.map_err(|e| match e {
        StorageError::Corrupt { .. } => anyhow::anyhow!(
            "{e}\n\nStored {what} could not be read. Run `contenthub --reset` to start fresh."
        ),
        other => anyhow::Error::new(other).context(format!("Failed to load {what}")),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) =
            std::fs::set_permissions(&config_dir, std::fs::Permissions::from_mode(0o700))
        {
            eprintln!(
                "Warning: failed to restrict {} to 0700: {}",
                config_dir.display(),
                e
            );
        }
    }

    let _log_guard = logging::init(&config_dir.join("logs"))?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(page_size) = args.page_size {
        config.page_size = usize::from(page_size);
    }

    let storage: Arc<dyn KeyValueStore> = if args.ephemeral {
        tracing::info!("Using in-memory storage");
        Arc::new(MemoryStore::new())
    } else {
        let db_path = config_dir.join("contenthub.db");
        let db_path_str = db_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
        match Database::open(db_path_str).await {
            Ok(db) => Arc::new(db),
            Err(StorageError::InstanceLocked) => {
                eprintln!(
                    "Error: Another instance of contenthub appears to be running. Please close it and try again."
                );
                std::process::exit(1);
            }
            Err(e) => return Err(anyhow::anyhow!("Failed to open database: {}", e)),
        }
    };

    if args.reset {
        clear_persisted(storage.as_ref())
            .await
            .context("Failed to reset stored data")?;
        println!("Stored preferences and favorites cleared.");
    }

    let preferences = or_reset_hint(
        PreferencesStore::load(storage.clone(), config.preference_defaults()).await,
        "preferences",
    )?;
    let favorites = or_reset_hint(FavoritesStore::load(storage).await, "favorites")?;

    let source = Arc::new(MockContentSource::new(
        config.fetch_delay(),
        config.page_size,
    ));

    let mut app = App::new(&config, source, preferences, favorites);
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}
