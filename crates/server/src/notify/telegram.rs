//! Telegram Bot API channel.

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::TelegramConfig;

/// Telegram Bot API base URL.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Errors that can occur when sending a Telegram message.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed.
    #[error("Telegram request failed: {0}")]
    Request(String),

    /// Bot API answered with a non-success status.
    #[error("Telegram API returned status {0}")]
    Api(u16),
}

/// Payload for the `sendMessage` method.
#[derive(Debug, Clone, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Client for posting order alerts to a Telegram chat.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    bot_token: SecretString,
    chat_id: String,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    /// Create a new Telegram notifier.
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            client: Client::new(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        }
    }

    /// Send an order alert to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the Bot API answers with
    /// anything other than `200 OK`.
    pub async fn send_order_alert(&self, summary: &str, time: &str) -> Result<(), TelegramError> {
        let text = order_alert_text(summary, time);
        let message = SendMessage {
            chat_id: &self.chat_id,
            text: &text,
            parse_mode: "HTML",
        };

        // The bot token is part of the URL path, not a header.
        let url = format!(
            "{TELEGRAM_API_BASE}/bot{}/sendMessage",
            self.bot_token.expose_secret()
        );

        let response = self
            .client
            .post(url)
            .json(&message)
            .send()
            .await
            .map_err(|e| TelegramError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TelegramError::Api(status.as_u16()));
        }

        debug!(chat_id = %self.chat_id, "Telegram order alert sent");

        Ok(())
    }
}

/// Build the message text for an order alert.
fn order_alert_text(summary: &str, time: &str) -> String {
    format!("🎉 New OfficeBar Order!\n\n{summary}\n\n⏰ Time: {time}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_alert_text_format() {
        let text = order_alert_text(
            "New Order from Kim Lee:\n• 2x Latte",
            "2026-08-21 09:30:00 UTC",
        );

        assert_eq!(
            text,
            "🎉 New OfficeBar Order!\n\nNew Order from Kim Lee:\n• 2x Latte\n\n⏰ Time: 2026-08-21 09:30:00 UTC"
        );
    }

    #[test]
    fn test_send_message_payload_shape() {
        let message = SendMessage {
            chat_id: "-100123",
            text: "hello",
            parse_mode: "HTML",
        };
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["chat_id"], "-100123");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["parse_mode"], "HTML");
    }

    #[test]
    fn test_debug_redacts_bot_token() {
        let notifier = TelegramNotifier::new(&TelegramConfig {
            bot_token: SecretString::from("123456:ABC-secret"),
            chat_id: "-100123".to_string(),
        });
        let debug = format!("{notifier:?}");

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("ABC-secret"));
    }
}
