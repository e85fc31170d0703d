//! config/campaign_config.rs
//! Configuración de la campaña, leída una sola vez al arrancar (variables de entorno / .env).

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;

/// Asunto fijo cuando no se define ASUNTO_EMAIL
pub const DEFAULT_SUBJECT: &str = "Propuesta de Colaboración";
/// Tiempo máximo por envío SMTP
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 30;

/// Modo de seguridad del canal SMTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Conexión en claro y luego STARTTLS obligatorio (puerto 587)
    StartTls,
    /// TLS implícito desde el inicio (puerto 465)
    Wrapper,
}

#[derive(Clone)]
pub struct CampaignConfig {
    pub mail_user: String,
    pub mail_password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_tls: TlsMode,
    pub smtp_timeout: Duration,
    pub dataset_path: PathBuf,
    pub template_path: PathBuf,
    pub subject: String,
}

// La contraseña nunca sale en los logs.
impl fmt::Debug for CampaignConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CampaignConfig")
            .field("mail_user", &self.mail_user)
            .field("mail_password", &"***")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_tls", &self.smtp_tls)
            .field("smtp_timeout", &self.smtp_timeout)
            .field("dataset_path", &self.dataset_path)
            .field("template_path", &self.template_path)
            .field("subject", &self.subject)
            .finish()
    }
}

impl CampaignConfig {
    /// Carga `.env` (si existe) y lee las variables del proceso.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la configuración desde cualquier fuente clave -> valor.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| -> Option<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let mail_user = required("GMAIL_USER")?;
        let mail_password = required("GMAIL_PASSWORD")?;
        let smtp_host = required("SMTP_SERVER")?;

        let port_raw = required("SMTP_PORT")?;
        let smtp_port = port_raw
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                key: "SMTP_PORT",
                value: port_raw.clone(),
                reason: e.to_string(),
            })?;

        let dataset_path = PathBuf::from(required("ARCHIVO_DATOS")?);
        let template_path = PathBuf::from(required("PLANTILLA_EMAIL")?);

        let subject = get("ASUNTO_EMAIL").unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        let smtp_tls = match get("SMTP_TLS") {
            None => TlsMode::StartTls,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "starttls" => TlsMode::StartTls,
                "tls" => TlsMode::Wrapper,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SMTP_TLS",
                        value: raw,
                        reason: "se esperaba \"starttls\" o \"tls\"".to_string(),
                    })
                }
            },
        };

        let timeout_secs = match get("SMTP_TIMEOUT_SECS") {
            None => DEFAULT_SMTP_TIMEOUT_SECS,
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "SMTP_TIMEOUT_SECS",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
        };

        Ok(Self {
            mail_user,
            mail_password,
            smtp_host,
            smtp_port,
            smtp_tls,
            smtp_timeout: Duration::from_secs(timeout_secs),
            dataset_path,
            template_path,
            subject,
        })
    }
}
