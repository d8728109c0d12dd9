use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `BanShield`.
///
/// Only `Config` is fatal. Every other variant is recovered inside the poll
/// loop: logged, optionally pushed to the chat channel, and followed by the
/// next sleep.
#[derive(Debug, Error)]
pub enum ShieldError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Page fetch ──────────────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Page classification ─────────────────────────────────────────────
    #[error("parse: {0}")]
    Parse(String),

    // ── Chat channel ────────────────────────────────────────────────────
    #[error("channel: {0}")]
    Channel(#[from] ChannelError),

    // ── External hand-off ───────────────────────────────────────────────
    #[error("handoff: {0}")]
    Handoff(#[from] HandoffError),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ProfileToWatch is not set; configure the profile to watch")]
    MissingTarget,

    #[error("invalid profile url '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },
}

// ─── Transport errors ────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Request(String),
}

// ─── Channel errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("telegram {method} failed ({status}): {body}")]
    Api {
        method: &'static str,
        status: u16,
        body: String,
    },

    #[error("telegram request failed: {0}")]
    Request(String),

    #[error("telegram response missing message_id")]
    MissingMessageId,

    #[error("cursor file: {0}")]
    Cursor(#[from] std::io::Error),
}

// ─── Hand-off errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("command line is empty")]
    EmptyCommand,

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' still running after {secs}s, killed")]
    Timeout { program: String, secs: u64 },
}
