mod env_overrides;
mod loader;
mod types;

pub use loader::DEFAULT_CONFIG_FILE;
pub use types::{
    Config, ConfirmationConfig, HandoffConfig, MAX_CHECK_INTERVAL_SECS, MIN_CHECK_INTERVAL_SECS,
    TelegramConfig, clamp_check_interval,
};
