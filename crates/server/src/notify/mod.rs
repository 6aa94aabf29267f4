//! Order notification fan-out.
//!
//! Every placed order is announced to the admin over up to three channels:
//! a Telegram chat, a Discord webhook, and a Gmail inbox. Channels run
//! concurrently and delivery is best effort. A failed or unconfigured
//! channel never fails the order; it only shows up as `success: false` in
//! the report embedded in the order response.

mod discord;
mod email;
mod telegram;

pub use discord::{DiscordError, DiscordNotifier};
pub use email::{EmailError, GmailMailer};
pub use telegram::{TelegramError, TelegramNotifier};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::models::{LineItem, Order};

/// Delivery result for a single channel.
///
/// `error` is only present when a configured channel attempted delivery
/// and failed; an unconfigured channel reports plain `success: false`.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelOutcome {
    /// The channel delivered the notification.
    #[must_use]
    pub const fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// The channel attempted delivery and failed.
    #[must_use]
    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
        }
    }

    /// The channel is not configured, so no attempt was made.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            success: false,
            error: None,
        }
    }
}

/// Aggregate outcome across all channels.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReport {
    pub telegram: ChannelOutcome,
    pub discord: ChannelOutcome,
    pub gmail: ChannelOutcome,
    pub total_sent: usize,
}

/// Fans order notifications out to every configured channel.
#[derive(Debug)]
pub struct Notifier {
    telegram: Option<TelegramNotifier>,
    discord: Option<DiscordNotifier>,
    gmail: Option<GmailMailer>,
}

impl Notifier {
    /// Build a notifier from application configuration.
    ///
    /// Channels without complete configuration stay disabled. A Gmail
    /// relay that fails to initialize is logged and treated as disabled
    /// rather than aborting startup.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let telegram = config.telegram().map(TelegramNotifier::new);
        let discord = config.discord().map(DiscordNotifier::new);
        let gmail = config
            .gmail()
            .and_then(|gmail| match GmailMailer::new(gmail) {
                Ok(mailer) => Some(mailer),
                Err(e) => {
                    warn!("Gmail notifications disabled: {e}");
                    None
                }
            });

        Self {
            telegram,
            discord,
            gmail,
        }
    }

    /// Notify every configured channel about a new order.
    ///
    /// Channels run concurrently; the slowest one bounds overall latency.
    /// Failures are captured per channel and never propagate.
    pub async fn notify(&self, order: &Order) -> NotificationReport {
        let bullets = items_bullets(&order.items);
        let summary = format!("New Order from {}:\n{bullets}", order.user_name);
        let items_block = format!("{}:\n{bullets}", order.user_name);
        let time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        info!(order_id = %order.id, "Dispatching order notifications");

        let telegram_future = self.send_telegram(&summary, &time);
        let discord_future = self.send_discord(&order.user_name, &items_block, &time);
        let gmail_future = self.send_gmail(&order.user_name, &summary, &order.items, &time);

        let (telegram, discord, gmail) =
            tokio::join!(telegram_future, discord_future, gmail_future);

        let total_sent = [&telegram, &discord, &gmail]
            .into_iter()
            .filter(|outcome| outcome.success)
            .count();

        info!(order_id = %order.id, total_sent, "Order notifications dispatched");

        NotificationReport {
            telegram,
            discord,
            gmail,
            total_sent,
        }
    }

    async fn send_telegram(&self, summary: &str, time: &str) -> ChannelOutcome {
        let Some(telegram) = &self.telegram else {
            debug!("Telegram not configured, skipping notification");
            return ChannelOutcome::skipped();
        };

        match telegram.send_order_alert(summary, time).await {
            Ok(()) => ChannelOutcome::sent(),
            Err(e) => {
                error!("Telegram notification failed: {e}");
                ChannelOutcome::failed(e.to_string())
            }
        }
    }

    async fn send_discord(&self, employee_name: &str, items: &str, time: &str) -> ChannelOutcome {
        let Some(discord) = &self.discord else {
            debug!("Discord not configured, skipping notification");
            return ChannelOutcome::skipped();
        };

        match discord.send_order_alert(employee_name, items, time).await {
            Ok(()) => ChannelOutcome::sent(),
            Err(e) => {
                error!("Discord notification failed: {e}");
                ChannelOutcome::failed(e.to_string())
            }
        }
    }

    async fn send_gmail(
        &self,
        employee_name: &str,
        summary: &str,
        items: &[LineItem],
        time: &str,
    ) -> ChannelOutcome {
        let Some(gmail) = &self.gmail else {
            debug!("Gmail not configured, skipping notification");
            return ChannelOutcome::skipped();
        };

        match gmail
            .send_order_alert(employee_name, summary, items, time)
            .await
        {
            Ok(()) => ChannelOutcome::sent(),
            Err(e) => {
                error!("Email notification failed: {e}");
                ChannelOutcome::failed(e.to_string())
            }
        }
    }
}

/// Bullet list of ordered items, one line per drink.
fn items_bullets(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|item| format!("• {}x {}", item.quantity, item.drink_name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use officebar_core::{OrderId, Price, UserId};
    use secrecy::SecretString;

    use crate::config::TelegramConfig;

    use super::*;

    fn item(drink_name: &str, quantity: u32) -> LineItem {
        LineItem {
            drink_id: drink_name.to_lowercase(),
            drink_name: drink_name.to_string(),
            quantity,
            price: Price::zero(),
        }
    }

    fn sample_order() -> Order {
        Order::new(
            OrderId::new(1),
            UserId::new(),
            "Kim Lee".to_string(),
            vec![item("Latte", 2), item("Espresso", 1)],
            Price::zero(),
        )
    }

    fn config_with_channels(telegram: Option<TelegramConfig>) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            token_secret: SecretString::from("k9mX2pQ7vL4nR8tY3wZ6bC1dF5gH0jS9"),
            telegram,
            discord: None,
            gmail: None,
        }
    }

    // ===== Outcomes =====

    #[test]
    fn test_outcome_serialization_omits_absent_error() {
        let sent = serde_json::to_value(ChannelOutcome::sent()).unwrap();
        assert_eq!(sent, serde_json::json!({ "success": true }));

        let skipped = serde_json::to_value(ChannelOutcome::skipped()).unwrap();
        assert_eq!(skipped, serde_json::json!({ "success": false }));

        let failed =
            serde_json::to_value(ChannelOutcome::failed("Status 401".to_string())).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({ "success": false, "error": "Status 401" })
        );
    }

    #[test]
    fn test_report_wire_names() {
        let report = NotificationReport {
            telegram: ChannelOutcome::skipped(),
            discord: ChannelOutcome::sent(),
            gmail: ChannelOutcome::skipped(),
            total_sent: 1,
        };
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["totalSent"], 1);
        assert_eq!(json["discord"]["success"], true);
    }

    // ===== Summary Building =====

    #[test]
    fn test_items_bullets_one_line_per_drink() {
        let items = vec![item("Latte", 2), item("Espresso", 1)];
        assert_eq!(items_bullets(&items), "• 2x Latte\n• 1x Espresso");
    }

    // ===== Fan-Out =====

    #[tokio::test]
    async fn test_notify_with_no_channels_configured() {
        let notifier = Notifier {
            telegram: None,
            discord: None,
            gmail: None,
        };

        let report = notifier.notify(&sample_order()).await;

        assert_eq!(report.total_sent, 0);
        assert!(!report.telegram.success);
        assert!(!report.discord.success);
        assert!(!report.gmail.success);

        // Unattempted channels carry no error detail on the wire.
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["telegram"], serde_json::json!({ "success": false }));
        assert_eq!(json["gmail"], serde_json::json!({ "success": false }));
    }

    #[test]
    fn test_from_config_enables_only_configured_channels() {
        let notifier = Notifier::from_config(&config_with_channels(Some(TelegramConfig {
            bot_token: SecretString::from("123456:ABC"),
            chat_id: "-100123".to_string(),
        })));

        assert!(notifier.telegram.is_some());
        assert!(notifier.discord.is_none());
        assert!(notifier.gmail.is_none());
    }
}
