use super::cursor::CursorStore;
use super::notice::Notice;
use super::telegram::TelegramTransport;
use super::traits::ChatTransport;
use crate::config::Config;
use crate::error::ChannelError;

/// Number of recent message ids `reset` tries to delete, cursor included.
pub const RESET_WINDOW: i64 = 15;
pub const RESET_PROBE_TEXT: &str = "reset_dummy";

/// Single-slot status channel: at most one message of ours is live in the
/// chat. Every send first deletes the previous one.
///
/// Without a transport (no credentials, or notifications switched off) every
/// call logs and returns `Ok`.
pub struct NotificationChannel {
    transport: Option<Box<dyn ChatTransport>>,
    cursor: CursorStore,
}

impl NotificationChannel {
    pub fn new(transport: Option<Box<dyn ChatTransport>>, cursor: CursorStore) -> Self {
        Self { transport, cursor }
    }

    pub fn from_config(config: &Config) -> Self {
        let transport = config.telegram.credentials().map(|(token, chat)| {
            Box::new(TelegramTransport::new(token.to_string(), chat.to_string()))
                as Box<dyn ChatTransport>
        });
        Self::new(transport, CursorStore::new(config.cursor_path()))
    }

    pub fn is_active(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn notify(&self, notice: &Notice) -> Result<(), ChannelError> {
        self.notify_text(&notice.to_string()).await
    }

    pub async fn notify_text(&self, payload: &str) -> Result<(), ChannelError> {
        let Some(transport) = self.transport.as_deref() else {
            tracing::info!("chat credentials missing; notification skipped: {payload}");
            return Ok(());
        };

        match self.cursor.load().await {
            Ok(Some(previous)) => {
                if let Err(error) = transport.delete_message(previous).await {
                    tracing::warn!(%error, previous, "could not delete previous status message");
                }
            }
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "could not read message cursor"),
        }

        let message_id = transport.send_message(payload).await?;
        if let Err(error) = self.cursor.store(message_id).await {
            // An unrecorded message would never be deleted by the next send.
            if let Err(delete_error) = transport.delete_message(message_id).await {
                tracing::warn!(%delete_error, message_id, "could not retract unrecorded status message");
            }
            return Err(error.into());
        }
        tracing::debug!(channel = transport.name(), message_id, "status sent: {payload}");
        Ok(())
    }

    /// Best-effort cleanup of leftovers from an earlier run. Returns how many
    /// messages were deleted.
    pub async fn reset(&self) -> Result<usize, ChannelError> {
        let Some(transport) = self.transport.as_deref() else {
            tracing::info!("chat credentials missing; channel reset skipped");
            return Ok(0);
        };

        let newest = transport.send_message(RESET_PROBE_TEXT).await?;
        let oldest = (newest - (RESET_WINDOW - 1)).max(1);

        let mut deleted = 0;
        for message_id in oldest..=newest {
            match transport.delete_message(message_id).await {
                Ok(()) => deleted += 1,
                Err(error) => tracing::debug!(%error, message_id, "reset delete skipped"),
            }
        }

        self.cursor.clear().await?;
        tracing::info!(deleted, "channel reset complete");
        Ok(deleted)
    }
}
