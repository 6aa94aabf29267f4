//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OFFICEBAR_TOKEN_SECRET` - Bearer token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `OFFICEBAR_HOST` - Bind address (default: 127.0.0.1)
//! - `OFFICEBAR_PORT` - Listen port (default: 3000)
//!
//! ## Optional (Telegram - enables order alerts via the Bot API)
//! - `TELEGRAM_BOT_TOKEN` - Bot token issued by `BotFather`
//! - `TELEGRAM_CHAT_ID` - Chat to post order alerts into
//!
//! ## Optional (Discord - enables order alerts via an incoming webhook)
//! - `DISCORD_WEBHOOK_URL` - Full webhook URL including its token
//!
//! ## Optional (Gmail - enables order emails via Gmail SMTP)
//! - `GMAIL_USER` - Gmail account used as the sender
//! - `GMAIL_PASSWORD` - Gmail app password for that account
//! - `ADMIN_EMAIL` - Recipient for order notification emails
//!
//! A notification channel whose variables are absent is simply disabled;
//! orders still succeed with that channel reported as not sent.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// OfficeBar application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer token signing secret
    pub token_secret: SecretString,
    /// Telegram notification configuration (optional)
    pub telegram: Option<TelegramConfig>,
    /// Discord notification configuration (optional)
    pub discord: Option<DiscordConfig>,
    /// Gmail notification configuration (optional)
    pub gmail: Option<GmailConfig>,
}

/// Telegram Bot API configuration for order alerts.
///
/// Implements `Debug` manually to redact the bot token.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token issued by `BotFather` (grants full bot control).
    pub bot_token: SecretString,
    /// Chat ID to post order alerts into.
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramConfig {
    /// Load Telegram configuration from environment.
    ///
    /// Returns `None` if Telegram variables are not set (channel disabled).
    /// Both variables must be set together.
    fn from_env() -> Option<Self> {
        let bot_token = get_optional_env("TELEGRAM_BOT_TOKEN");
        let chat_id = get_optional_env("TELEGRAM_CHAT_ID");

        match (bot_token, chat_id) {
            (Some(token), Some(chat_id)) => {
                // Validate the token if present
                if let Err(e) = validate_secret_strength(&token, "TELEGRAM_BOT_TOKEN") {
                    tracing::warn!("TELEGRAM_BOT_TOKEN validation warning: {e}");
                }
                Some(Self {
                    bot_token: SecretString::from(token),
                    chat_id,
                })
            }
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Telegram notifications disabled: TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together"
                );
                None
            }
        }
    }
}

/// Discord incoming-webhook configuration for order alerts.
///
/// The webhook URL embeds its own credential, so the whole URL is treated
/// as a secret. Implements `Debug` manually to redact it.
#[derive(Clone)]
pub struct DiscordConfig {
    /// Full webhook URL including its token.
    pub webhook_url: SecretString,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("webhook_url", &"[REDACTED]")
            .finish()
    }
}

impl DiscordConfig {
    /// Load Discord configuration from environment.
    ///
    /// Returns `None` if `DISCORD_WEBHOOK_URL` is not set (channel disabled).
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(raw) = get_optional_env("DISCORD_WEBHOOK_URL") else {
            return Ok(None);
        };

        Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("DISCORD_WEBHOOK_URL".to_string(), e.to_string())
        })?;

        Ok(Some(Self {
            webhook_url: SecretString::from(raw),
        }))
    }
}

/// Gmail SMTP configuration for order notification emails.
///
/// Implements `Debug` manually to redact the app password.
#[derive(Clone)]
pub struct GmailConfig {
    /// Gmail account used as the sender (also the SMTP username).
    pub user: String,
    /// Gmail app password for that account.
    pub password: SecretString,
    /// Recipient for order notification emails.
    pub admin_email: String,
}

impl std::fmt::Debug for GmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailConfig")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

impl GmailConfig {
    /// Load Gmail configuration from environment.
    ///
    /// Returns `None` if Gmail variables are not set (channel disabled).
    /// All three variables must be set together.
    fn from_env() -> Option<Self> {
        let user = get_optional_env("GMAIL_USER");
        let password = get_optional_env("GMAIL_PASSWORD");
        let admin_email = get_optional_env("ADMIN_EMAIL");

        match (user, password, admin_email) {
            (Some(user), Some(password), Some(admin_email)) => Some(Self {
                user,
                password: SecretString::from(password),
                admin_email,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!(
                    "Gmail notifications disabled: GMAIL_USER, GMAIL_PASSWORD and ADMIN_EMAIL must be set together"
                );
                None
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("OFFICEBAR_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("OFFICEBAR_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("OFFICEBAR_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("OFFICEBAR_PORT".to_string(), e.to_string()))?;
        let token_secret = get_validated_secret("OFFICEBAR_TOKEN_SECRET")?;
        validate_token_secret(&token_secret, "OFFICEBAR_TOKEN_SECRET")?;

        let telegram = TelegramConfig::from_env();
        let discord = DiscordConfig::from_env()?;
        let gmail = GmailConfig::from_env();

        Ok(Self {
            host,
            port,
            token_secret,
            telegram,
            discord,
            gmail,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the Telegram configuration, if available.
    ///
    /// Returns `None` if Telegram variables are not set, which disables
    /// order alerts on that channel.
    #[must_use]
    pub const fn telegram(&self) -> Option<&TelegramConfig> {
        self.telegram.as_ref()
    }

    /// Returns a reference to the Discord configuration, if available.
    #[must_use]
    pub const fn discord(&self) -> Option<&DiscordConfig> {
        self.discord.as_ref()
    }

    /// Returns a reference to the Gmail configuration, if available.
    #[must_use]
    pub const fn gmail(&self) -> Option<&GmailConfig> {
        self.gmail.as_ref()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the token secret meets minimum length requirements.
fn validate_token_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_TOKEN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API tokens have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
