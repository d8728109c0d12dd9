use crate::error::ConfigError;
use crate::monitor::Target;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const MIN_CHECK_INTERVAL_SECS: u64 = 20;
pub const MAX_CHECK_INTERVAL_SECS: u64 = 300;

const PID_MARKER_FILE: &str = "banshield.pid";
const CURSOR_FILE: &str = ".telegram_last_message_id";

/// Runtime configuration. Built once at startup and handed to the
/// orchestrator by value; nothing mutates it afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile URL to watch. Empty means "not configured".
    pub profile_to_watch: String,
    /// Seconds between poll cycles. Clamped on read, see [`Config::poll_interval`].
    pub check_interval_secs: u64,
    /// Rehearsal mode: fabricate one detection and hand off in no-effect mode.
    pub dry_run: bool,
    /// Directory holding the pid marker and the channel cursor.
    pub state_dir: PathBuf,
    pub fetch_timeout_secs: u64,
    pub telegram: TelegramConfig,
    pub confirmation: ConfirmationConfig,
    pub handoff: HandoffConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_to_watch: String::new(),
            check_interval_secs: MIN_CHECK_INTERVAL_SECS,
            dry_run: false,
            state_dir: PathBuf::from("."),
            fetch_timeout_secs: 10,
            telegram: TelegramConfig::default(),
            confirmation: ConfirmationConfig::default(),
            handoff: HandoffConfig::default(),
        }
    }
}

impl Config {
    /// Derive the fetchable target, failing when none is configured.
    pub fn target(&self) -> Result<Target, ConfigError> {
        let raw = self.profile_to_watch.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingTarget);
        }
        Target::parse(raw)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(clamp_check_interval(self.check_interval_secs))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    pub fn pid_marker_path(&self) -> PathBuf {
        self.state_dir.join(PID_MARKER_FILE)
    }

    pub fn cursor_path(&self) -> PathBuf {
        self.state_dir.join(CURSOR_FILE)
    }
}

pub fn clamp_check_interval(secs: u64) -> u64 {
    secs.clamp(MIN_CHECK_INTERVAL_SECS, MAX_CHECK_INTERVAL_SECS)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Master switch. When off the channel acts as if no credentials exist.
    pub notify: bool,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            notify: true,
            bot_token: None,
            chat_id: None,
        }
    }
}

impl TelegramConfig {
    /// Token and chat id, only when both are present and notifications are on.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if !self.notify {
            return None;
        }
        let token = self.bot_token.as_deref().filter(|t| !t.is_empty())?;
        let chat = self.chat_id.as_deref().filter(|c| !c.is_empty())?;
        Some((token, chat))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub samples: u32,
    pub sample_delay_secs: u64,
    pub quorum: u32,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            samples: 10,
            sample_delay_secs: 5,
            quorum: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HandoffConfig {
    /// Command line of the transfer program, whitespace separated.
    pub command: String,
    /// Command line of the companion watchdog.
    pub watchdog_command: String,
    /// Upper bound on the transfer program's run time.
    pub timeout_secs: u64,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            command: "node SendTrade.js".into(),
            watchdog_command: "node WatchDog.js".into(),
            timeout_secs: 600,
        }
    }
}

impl HandoffConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
