#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use banshield::app::{self, EXIT_CONFIG_ERROR};
use banshield::config::Config;
use banshield::monitor::Shutdown;
use banshield::platform::{PidMarker, signals::spawn_stop_listener};
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Install default crypto provider for Rustls TLS.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }

    tracing::info!("BanShield started");

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("{error:#}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    if cli.dry_run {
        config.dry_run = true;
    }

    let _pid_marker = PidMarker::create(config.pid_marker_path())
        .inspect_err(|error| tracing::warn!("{error:#}"))
        .ok();

    let (stop_tx, shutdown) = Shutdown::channel();
    let stop_listener = spawn_stop_listener(stop_tx);

    let code = app::launch(&config, app::default_collaborators(&config), shutdown).await;

    stop_listener.abort();
    ExitCode::from(code)
}
