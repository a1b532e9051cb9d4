use argus_core::error::AppError;
use argus_core::traits::Notifier;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Default SMTP submission port (SMTP2Go's alternate port).
const DEFAULT_SMTP_PORT: u16 = 2525;

/// Configuration for the outcome-email relay.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl MailerConfig {
    /// Read mailer configuration from environment variables.
    ///
    /// Returns `Ok(None)` when `ARGUS_SMTP_HOST` is unset, which disables
    /// outcome emails entirely. When the host is set:
    /// - `ARGUS_SMTP_USERNAME` (required)
    /// - `ARGUS_SMTP_PASSWORD` (required)
    /// - `ARGUS_MAIL_FROM` (required, sender address)
    /// - `ARGUS_SMTP_PORT` (optional, defaults to 2525)
    pub fn from_env() -> Result<Option<Self>, AppError> {
        let Ok(host) = std::env::var("ARGUS_SMTP_HOST") else {
            return Ok(None);
        };

        let username = require_var("ARGUS_SMTP_USERNAME")?;
        let password = require_var("ARGUS_SMTP_PASSWORD")?;
        let from = require_var("ARGUS_MAIL_FROM")?;

        let port = match std::env::var("ARGUS_SMTP_PORT") {
            Err(_) => DEFAULT_SMTP_PORT,
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid ARGUS_SMTP_PORT '{raw}': must be a port number"
                ))
            })?,
        };

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            from,
        }))
    }
}

fn require_var(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| {
        AppError::ConfigError(format!(
            "{name} not set. Required when ARGUS_SMTP_HOST is configured."
        ))
    })
}

/// SMTP notifier delivering HTML outcome emails over STARTTLS.
#[derive(Debug, Clone)]
pub struct LettreMailer {
    config: MailerConfig,
    from: Mailbox,
}

impl LettreMailer {
    pub fn new(config: MailerConfig) -> Result<Self, AppError> {
        let from = config.from.parse::<Mailbox>().map_err(|e| {
            AppError::ConfigError(format!("Invalid sender address '{}': {e}", config.from))
        })?;

        Ok(Self { config, from })
    }

    fn build_message(&self, to: Mailbox, subject: &str, body: &str) -> Result<Message, AppError> {
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(wrap_html(body))
            .map_err(|e| AppError::MailError(format!("Failed to build message: {e}")))
    }

    // The smtp transport is blocking; callers hand it to spawn_blocking.
    fn send_blocking(config: &MailerConfig, message: &Message) -> Result<(), AppError> {
        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| AppError::MailError(format!("SMTP relay init failed: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        transport
            .send(message)
            .map_err(|e| AppError::MailError(e.to_string()))?;

        Ok(())
    }
}

/// Wraps a notification body in the HTML shell the templates expect.
fn wrap_html(body: &str) -> String {
    format!(
        "<html>\n  <head>\n    <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">\n  </head>\n  <body>\n    {body}\n  </body>\n</html>"
    )
}

impl Notifier for LettreMailer {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| AppError::MailError(format!("Invalid recipient address '{to}': {e}")))?;

        let message = self.build_message(to, subject, body)?;
        tracing::info!("Sending '{}' notification via {}", subject, self.config.host);

        let config = self.config.clone();
        tokio::task::spawn_blocking(move || Self::send_blocking(&config, &message))
            .await
            .map_err(|e| AppError::MailError(format!("Mail task failed: {e}")))?
    }
}
