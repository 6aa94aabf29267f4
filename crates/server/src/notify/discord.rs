//! Discord webhook channel.

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::DiscordConfig;

/// Embed accent color.
const EMBED_COLOR: u32 = 0x0066_7EEA;

/// Errors that can occur when posting to a Discord webhook.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// HTTP request failed.
    #[error("Discord request failed: {0}")]
    Request(String),

    /// Webhook answered with a non-success status.
    #[error("Discord webhook returned status {0}")]
    Api(u16),
}

/// Webhook payload carrying a single embed.
///
/// `content` is always null; the embed carries everything.
#[derive(Debug, Clone, Serialize)]
struct WebhookPayload {
    content: Option<String>,
    embeds: Vec<Embed>,
}

/// A rich embed.
#[derive(Debug, Clone, Serialize)]
struct Embed {
    title: &'static str,
    description: String,
    color: u32,
    fields: Vec<EmbedField>,
    footer: EmbedFooter,
}

/// A name/value block inside an embed.
#[derive(Debug, Clone, Serialize)]
struct EmbedField {
    name: &'static str,
    value: String,
    inline: bool,
}

/// Footer line of an embed.
#[derive(Debug, Clone, Serialize)]
struct EmbedFooter {
    text: &'static str,
}

/// Client for posting order alerts to a Discord webhook.
#[derive(Clone)]
pub struct DiscordNotifier {
    client: Client,
    webhook_url: SecretString,
}

impl std::fmt::Debug for DiscordNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordNotifier")
            .field("webhook_url", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl DiscordNotifier {
    /// Create a new Discord notifier.
    #[must_use]
    pub fn new(config: &DiscordConfig) -> Self {
        Self {
            client: Client::new(),
            webhook_url: config.webhook_url.clone(),
        }
    }

    /// Post an order alert embed to the webhook.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the webhook answers with a
    /// status other than `204 No Content` or `200 OK`.
    pub async fn send_order_alert(
        &self,
        employee_name: &str,
        items: &str,
        time: &str,
    ) -> Result<(), DiscordError> {
        let payload = order_alert_payload(employee_name, items, time);

        let response = self
            .client
            .post(self.webhook_url.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| DiscordError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT && status != StatusCode::OK {
            return Err(DiscordError::Api(status.as_u16()));
        }

        debug!("Discord order alert sent");

        Ok(())
    }
}

/// Build the order alert embed.
fn order_alert_payload(employee_name: &str, items: &str, time: &str) -> WebhookPayload {
    WebhookPayload {
        content: None,
        embeds: vec![Embed {
            title: "🎉 New OfficeBar Order!",
            description: format!("New order from **{employee_name}**"),
            color: EMBED_COLOR,
            fields: vec![
                EmbedField {
                    name: "Items Ordered",
                    value: items.to_string(),
                    inline: false,
                },
                EmbedField {
                    name: "Time",
                    value: time.to_string(),
                    inline: false,
                },
            ],
            footer: EmbedFooter {
                text: "OfficeBar Order System",
            },
        }],
    }
}
