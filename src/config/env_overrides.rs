use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(profile) = std::env::var("ProfileToWatch")
            && !profile.trim().is_empty()
        {
            self.profile_to_watch = profile.trim().to_string();
        }

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN")
            && !token.is_empty()
        {
            self.telegram.bot_token = Some(token);
        }

        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID")
            && !chat_id.is_empty()
        {
            self.telegram.chat_id = Some(chat_id);
        }

        if let Ok(notify) = std::env::var("TelegramNotify")
            && !notify.is_empty()
        {
            self.telegram.notify = notify.trim().eq_ignore_ascii_case("true");
        }

        if let Ok(interval) = std::env::var("CHECK_INTERVAL") {
            match interval.trim().parse::<u64>() {
                Ok(secs) => self.check_interval_secs = secs,
                Err(error) => {
                    tracing::warn!(value = %interval, %error, "ignoring non-numeric CHECK_INTERVAL");
                }
            }
        }

        if std::env::var("BANSHIELD_DRY_RUN").is_ok_and(|v| v == "1") {
            self.dry_run = true;
        }

        if let Ok(cmd) = std::env::var("BANSHIELD_HANDOFF_CMD")
            && !cmd.trim().is_empty()
        {
            self.handoff.command = cmd;
        }

        if let Ok(cmd) = std::env::var("BANSHIELD_WATCHDOG_CMD")
            && !cmd.trim().is_empty()
        {
            self.handoff.watchdog_command = cmd;
        }

        if let Ok(dir) = std::env::var("BANSHIELD_STATE_DIR")
            && !dir.is_empty()
        {
            self.state_dir = PathBuf::from(dir);
        }
    }
}
