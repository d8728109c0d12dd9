//! Outbound status channel.

mod cursor;
mod notice;
mod notifier;
pub mod telegram;
pub mod traits;

pub use cursor::CursorStore;
pub use notice::Notice;
pub use notifier::{NotificationChannel, RESET_PROBE_TEXT, RESET_WINDOW};
pub use telegram::TelegramTransport;
pub use traits::ChatTransport;
