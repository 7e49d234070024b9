pub mod analytics;
pub mod composting;
pub mod console;
pub mod devices;
pub mod location;
pub mod models;
pub mod navigation;
pub mod settings;
pub mod store;
pub mod utils;
pub mod waste;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use location::{FixedPosition, OfflineGeocoder};
use models::Coordinates;
use settings::{SettingsStore, UserSettings};
use store::Store;

/// Everything a front end needs to drive the app.
pub struct AppContext {
    pub store: Store,
    pub settings: SettingsStore,
    pub position: FixedPosition,
    pub geocoder: OfflineGeocoder,
}

impl AppContext {
    /// Must be called inside a tokio runtime.
    pub fn new(settings: SettingsStore) -> Self {
        let timings = settings.current().stage_timings();
        let default_location = models::Location::default();

        Self {
            store: Store::new(timings),
            settings,
            position: FixedPosition(Coordinates {
                lat: default_location.lat,
                lng: default_location.lng,
            }),
            geocoder: OfflineGeocoder,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wtrash")]
#[command(about = "Console companion for the W-Trash smart bin")]
struct Cli {
    /// Settings file; falls back to $WTRASH_SETTINGS, then built-in defaults
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Run composting stages 60x faster
    #[arg(long)]
    fast: bool,
}

fn load_settings(cli: &Cli) -> Result<SettingsStore> {
    let path = cli
        .settings
        .clone()
        .or_else(|| std::env::var_os("WTRASH_SETTINGS").map(PathBuf::from));

    let settings = match path {
        Some(path) => SettingsStore::new(path)?,
        None => SettingsStore::in_memory(UserSettings::default()),
    };

    settings.apply_env_overrides();
    if cli.fast {
        settings.enable_fast_stages();
    }
    Ok(settings)
}

pub fn run() -> Result<()> {
    utils::logging::init();

    let cli = Cli::parse();
    log::info!("W-Trash starting up...");

    let settings = load_settings(&cli)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    runtime.block_on(async move {
        let context = AppContext::new(settings);
        console::run_console(&context).await
    })
}
