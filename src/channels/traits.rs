use crate::error::ChannelError;
use std::future::Future;
use std::pin::Pin;

/// Minimal chat surface the status channel needs: post a message and learn
/// its id, delete a message by id.
pub trait ChatTransport: Send + Sync {
    /// Human-readable transport name
    fn name(&self) -> &str;

    /// Post `text` and return the id the chat assigned to it.
    fn send_message<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<i64, ChannelError>> + Send + 'a>>;

    fn delete_message(
        &self,
        message_id: i64,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChannelError>> + Send + '_>>;
}
