use crate::app::status::{render_outcome, render_status};
use crate::channels::NotificationChannel;
use crate::config::Config;
use crate::handoff::ProcessHandoff;
use crate::monitor::{
    Collaborators, HttpPageFetcher, Orchestrator, RunOutcome, Shutdown, TextPatternClassifier,
};

pub const EXIT_OK: u8 = 0;
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Real HTTP fetcher, text classifier, Telegram channel and process hand-off.
pub fn default_collaborators(config: &Config) -> Collaborators {
    Collaborators {
        fetcher: Box::new(HttpPageFetcher::new(config.fetch_timeout())),
        classifier: Box::new(TextPatternClassifier),
        channel: NotificationChannel::from_config(config),
        handoff: Box::new(ProcessHandoff::from_config(&config.handoff)),
    }
}

/// Validate, run the poll loop to its terminal state, and return the exit
/// code. Nothing is touched when the configuration is unusable.
pub async fn launch(config: &Config, collaborators: Collaborators, shutdown: Shutdown) -> u8 {
    for line in render_status(config) {
        tracing::info!("{line}");
    }

    match Orchestrator::new(config, collaborators, shutdown) {
        Ok(orchestrator) => run_to_exit(orchestrator).await,
        Err(error) => {
            tracing::error!(%error, "configuration error, monitor not started");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Drive an already-built orchestrator to its terminal state.
pub async fn run_to_exit(orchestrator: Orchestrator) -> u8 {
    let outcome = orchestrator.run().await;
    match &outcome {
        RunOutcome::HandedOff { exit_code, .. } | RunOutcome::Rehearsed { exit_code, .. }
            if *exit_code != Some(0) =>
        {
            tracing::warn!("{}", render_outcome(&outcome));
        }
        _ => tracing::info!("{}", render_outcome(&outcome)),
    }
    EXIT_OK
}
