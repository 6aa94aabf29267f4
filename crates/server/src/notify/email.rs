//! Gmail SMTP channel.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::debug;

use crate::config::GmailConfig;
use crate::models::LineItem;

/// Gmail SMTP relay host.
const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";

/// Gmail SMTP submission port (STARTTLS).
const GMAIL_SMTP_PORT: u16 = 587;

/// HTML template for the order notification email.
#[derive(Template)]
#[template(path = "email/order_notification.html")]
struct OrderNotificationHtml<'a> {
    employee_name: &'a str,
    items: &'a [LineItem],
    time: &'a str,
}

/// Plain text template for the order notification email.
#[derive(Template)]
#[template(path = "email/order_notification.txt")]
struct OrderNotificationText<'a> {
    employee_name: &'a str,
    summary: &'a str,
    time: &'a str,
}

/// Errors that can occur when sending the notification email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Emails order notifications to the admin inbox through Gmail.
#[derive(Clone)]
pub struct GmailMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    admin_email: String,
}

impl std::fmt::Debug for GmailMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailMailer")
            .field("from_address", &self.from_address)
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}

impl GmailMailer {
    /// Create a new Gmail mailer from configuration.
    ///
    /// The sending account doubles as the SMTP username and the `From`
    /// address.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &GmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.user.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(GMAIL_SMTP_HOST)?
            .port(GMAIL_SMTP_PORT)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.user.clone(),
            admin_email: config.admin_email.clone(),
        })
    }

    /// Email the admin about a new order.
    ///
    /// # Errors
    ///
    /// Returns error if a template fails to render, the message cannot be
    /// built, or SMTP delivery fails.
    pub async fn send_order_alert(
        &self,
        employee_name: &str,
        summary: &str,
        items: &[LineItem],
        time: &str,
    ) -> Result<(), EmailError> {
        let html = OrderNotificationHtml {
            employee_name,
            items,
            time,
        }
        .render()?;
        let text = OrderNotificationText {
            employee_name,
            summary,
            time,
        }
        .render()?;

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(self
                .admin_email
                .parse()
                .map_err(|_| EmailError::InvalidAddress(self.admin_email.clone()))?)
            .subject(format!("🎉 New OfficeBar Order from {employee_name}"))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        self.mailer.send(email).await?;

        debug!(to = %self.admin_email, "Order notification email sent");

        Ok(())
    }
}
