use crate::config::Config;
use crate::monitor::RunOutcome;

/// Startup summary, one line per setting.
pub fn render_status(config: &Config) -> Vec<String> {
    let mode = if config.dry_run { "rehearsal (dry-run)" } else { "live" };
    let channel = if config.telegram.credentials().is_some() {
        "telegram"
    } else if config.telegram.notify {
        "disabled (credentials missing)"
    } else {
        "disabled (TelegramNotify=false)"
    };
    let target = if config.profile_to_watch.trim().is_empty() {
        "(not set)"
    } else {
        config.profile_to_watch.trim()
    };

    vec![
        format!("version        {}", env!("CARGO_PKG_VERSION")),
        format!("mode           {mode}"),
        format!("profile        {target}"),
        format!("interval       {}s", config.poll_interval().as_secs()),
        format!(
            "confirmation   {} samples, {}s apart, quorum {}",
            config.confirmation.samples,
            config.confirmation.sample_delay_secs,
            config.confirmation.quorum
        ),
        format!("channel        {channel}"),
        format!("hand-off       {}", config.handoff.command),
        format!("watchdog       {}", config.handoff.watchdog_command),
    ]
}

pub fn render_outcome(outcome: &RunOutcome) -> String {
    let code = |exit_code: &Option<i32>| {
        exit_code.map_or_else(|| "none".to_string(), |c| c.to_string())
    };
    match outcome {
        RunOutcome::HandedOff {
            mode,
            exit_code,
            check,
        } => format!(
            "ban confirmed at check #{check}; {mode:?} hand-off exited with {}",
            code(exit_code)
        ),
        RunOutcome::Rehearsed {
            kind,
            exit_code,
            check,
        } => format!(
            "rehearsal fired a simulated {kind} ban at check #{check}; dry-run hand-off exited with {}",
            code(exit_code)
        ),
        RunOutcome::Stopped { check } => format!("stopped after {check} checks"),
    }
}
