//! services/email_service.rs

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    config::campaign_config::{CampaignConfig, TlsMode},
    errors::SendError,
};

/// Envío de un email de texto plano a un único destinatario.
///
/// Los errores se devuelven como valor; nunca cortan la campaña.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), SendError>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    user: String,
    password: String,
    host: String,
    port: u16,
    tls: TlsMode,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &CampaignConfig) -> Self {
        Self {
            user: config.mail_user.clone(),
            password: config.mail_password.clone(),
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            tls: config.smtp_tls,
            timeout: config.smtp_timeout,
        }
    }

    pub(crate) fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, SendError> {
        let from: Mailbox = self
            .user
            .parse()
            .map_err(|_| SendError::InvalidAddress(self.user.clone()))?;
        let to: Mailbox = recipient
            .parse()
            .map_err(|_| SendError::InvalidAddress(recipient.to_string()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| SendError::Message(e.to_string()))
    }

    /// Un transporte nuevo por envío: se conecta, negocia TLS, autentica y se descarta.
    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, SendError> {
        let tls_params = TlsParameters::new(self.host.clone())
            .map_err(|e| SendError::Transport(e.to_string()))?;
        let tls = match self.tls {
            TlsMode::StartTls => Tls::Required(tls_params),
            TlsMode::Wrapper => Tls::Wrapper(tls_params),
        };

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host)
                .port(self.port)
                .tls(tls)
                .credentials(Credentials::new(self.user.clone(), self.password.clone()))
                .timeout(Some(self.timeout))
                .build(),
        )
    }

    async fn try_send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), SendError> {
        let message = self.build_message(recipient, subject, body)?;
        let mailer = self.build_transport()?;

        tokio::time::timeout(self.timeout, mailer.send(message))
            .await
            .map_err(|_| SendError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| SendError::Transport(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), SendError> {
        match self.try_send(recipient, subject, body).await {
            Ok(()) => {
                log::info!("Email enviado a {}", recipient);
                Ok(())
            }
            Err(e) => {
                log::error!("Fallo al enviar el email a {}: {}", recipient, e);
                Err(e)
            }
        }
    }
}
