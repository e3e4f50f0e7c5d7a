//! rentdesk - Main Entry Point
//!
//! Command-line management client for the car-rental backend.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use rentdesk::constants::LOG_FILE_PREFIX;
use rentdesk::helpers::get_or_create_data_dir;
use rentdesk::session::SettingsStore;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Log to stderr (warnings only unless verbose) and to a daily file in the
/// data dir. The returned guard flushes the file writer on drop.
fn init_tracing(log_level: Option<&str>, verbose: bool) -> Option<WorkerGuard> {
    let directive = log_level.map(str::trim).filter(|l| !l.is_empty()).unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let stderr_level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(LocalTime::rfc_3339())
        .with_filter(stderr_level);

    let (file, guard) = match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339())
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("File logging disabled: {e}");
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .init();
    guard
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings_store = SettingsStore::open_default()?;
    let settings = settings_store.load_with_env()?;
    let _guard = init_tracing(settings.log_level.as_deref(), cli.verbose);

    tracing::info!("Starting rentdesk {}", env!("CARGO_PKG_VERSION"));
    commands::execute(cli, &settings_store, settings)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
