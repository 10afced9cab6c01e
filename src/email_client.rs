use crate::{configuration::EmailClientConfig, domain::EmailObject};
use async_trait::async_trait;
use lettre::{
    message::SinglePart,
    transport::smtp::{authentication::Credentials, PoolConfig},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;
use std::time::Duration;

#[async_trait]
pub trait GenericEmailService: Send + Sync {
    async fn send_text_email(
        &self,
        to: &str,
        subject: &str,
        body: String,
    ) -> Result<(), Box<dyn std::error::Error>>;

    async fn send_html_email(
        &self,
        to: &str,
        subject: &str,
        body: String,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

pub struct SmtpEmailClient {
    pub sender: EmailObject,
    pub mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailClient {
    #[tracing::instrument(skip(email_config))]
    pub fn new(email_config: &EmailClientConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let sender = email_config.sender()?;
        let smtp_credentials = Credentials::new(
            email_config.username.to_string(),
            email_config.password.expose_secret().to_string(),
        );
        tracing::info!("Establishing connection to the SMTP server.");
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&email_config.base_url)?
                .credentials(smtp_credentials)
                .pool_config(
                    PoolConfig::new()
                        .min_idle(3)
                        .max_size(10)
                        .idle_timeout(Duration::new(300, 0)),
                )
                .build();

        Ok(Self { sender, mailer })
    }
}

#[async_trait]
impl GenericEmailService for SmtpEmailClient {
    async fn send_text_email(
        &self,
        to: &str,
        subject: &str,
        body: String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let email = Message::builder()
            .from(self.sender.as_ref().parse()?)
            .to(to.parse()?)
            .subject(subject)
            .body(body)?;

        self.mailer.send(email).await?;
        tracing::info!("Mail sent successfully");
        Ok(())
    }

    async fn send_html_email(
        &self,
        to: &str,
        subject: &str,
        body: String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let email = Message::builder()
            .from(self.sender.as_ref().parse()?)
            .to(to.parse()?)
            .subject(subject)
            .singlepart(SinglePart::html(body))?;

        self.mailer.send(email).await?;
        tracing::info!("HTML mail sent successfully");
        Ok(())
    }
}

/// No-op client used when SMTP credentials are not configured, e.g. in
/// local development and integration tests.
pub struct DummyEmailClient {}

impl DummyEmailClient {
    pub fn new() -> Self {
        tracing::info!("Using dummy email client; outbound mail is discarded.");
        Self {}
    }
}

impl Default for DummyEmailClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenericEmailService for DummyEmailClient {
    async fn send_text_email(
        &self,
        _to: &str,
        _subject: &str,
        _body: String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    async fn send_html_email(
        &self,
        _to: &str,
        _subject: &str,
        _body: String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
