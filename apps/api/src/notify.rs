//! Outbound email notifications.
//!
//! Not on the webhook path today: stage-change emails were superseded by the
//! PDF upload flow. The notifier stays wired into the app state so the
//! feature can be revived without re-plumbing configuration.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use crate::config::SmtpConfig;

#[derive(Clone)]
pub struct Notifier {
    smtp: Option<SmtpConfig>,
}

#[allow(dead_code)] // not called from the webhook path; see module docs
impl Notifier {
    pub fn new(smtp: Option<SmtpConfig>) -> Self {
        Self { smtp }
    }

    /// Sends a plain-text email over an authenticated STARTTLS session.
    /// Fails fast with `false` when the SMTP settings are incomplete; any
    /// send failure is logged and reduced to `false`, never raised.
    pub async fn send_email(&self, subject: &str, body: &str) -> bool {
        let Some(smtp) = &self.smtp else {
            error!("Missing SMTP configuration; email not sent");
            return false;
        };

        match self.try_send(smtp, subject, body).await {
            Ok(()) => {
                info!(to = %smtp.to, "email sent");
                true
            }
            Err(e) => {
                error!("failed to send email: {e}");
                false
            }
        }
    }

    async fn try_send(&self, smtp: &SmtpConfig, subject: &str, body: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(smtp.from.parse()?)
            .to(smtp.to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
            .build();

        mailer.send(message).await?;
        Ok(())
    }
}
