use crate::channels::traits::ChatTransport;
use crate::error::ChannelError;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;


const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT_SECS: u64 = 5;

/// Telegram Bot API transport bound to a single chat.
pub struct TelegramTransport {
    bot_token: String,
    chat_id: String,
    api_base: String,
    client: Client,
}

impl TelegramTransport {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            bot_token,
            chat_id,
            api_base: DEFAULT_API_BASE.to_string(),
            client,
        }
    }

    /// Point the transport at a different Bot API host (local mirrors, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.bot_token)
    }

    async fn call(
        &self,
        method: &'static str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ChannelError> {
        let resp = self
            .client
            .post(self.api_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| ChannelError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(ChannelError::Api {
                method,
                status: status.as_u16(),
                body,
            });
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ChannelError::Request(e.to_string()))?;

        if data.get("ok").and_then(serde_json::Value::as_bool) == Some(false) {
            return Err(ChannelError::Api {
                method,
                status: status.as_u16(),
                body: data.to_string(),
            });
        }

        Ok(data)
    }
}

impl ChatTransport for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send_message<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<i64, ChannelError>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
            });
            let data = self.call("sendMessage", body).await?;
            data.get("result")
                .and_then(|r| r.get("message_id"))
                .and_then(serde_json::Value::as_i64)
                .ok_or(ChannelError::MissingMessageId)
        })
    }

    fn delete_message(
        &self,
        message_id: i64,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChannelError>> + Send + '_>> {
        Box::pin(async move {
            let body = serde_json::json!({
                "chat_id": self.chat_id,
                "message_id": message_id,
            });
            self.call("deleteMessage", body).await.map(|_| ())
        })
    }
}
