//! tests/support.rs
//! Dobles de prueba: mailer que registra envíos y planilla en memoria.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::{DatasetError, SendError};
use crate::models::contact_model::{CellValue, ContactDataset};
use crate::services::contact_service::ContactStore;
use crate::services::email_service::Mailer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Registra cada intento; falla para los destinatarios listados en `failing`.
#[derive(Default)]
pub struct RecordingMailer {
    pub failing: Vec<String>,
    pub attempts: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            failing: recipients.iter().map(|r| r.to_string()).collect(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<SentEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), SendError> {
        self.attempts.lock().unwrap().push(SentEmail {
            to: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.failing.iter().any(|f| f == recipient) {
            return Err(SendError::Transport("550 mailbox unavailable".to_string()));
        }
        Ok(())
    }
}

/// Planilla en memoria. `saved` guarda la última versión persistida.
pub struct MemoryStore {
    pub initial: ContactDataset,
    pub saved: Mutex<Option<ContactDataset>>,
    pub fail_save: bool,
}

impl MemoryStore {
    pub fn new(initial: ContactDataset) -> Self {
        Self {
            initial,
            saved: Mutex::new(None),
            fail_save: false,
        }
    }

    pub fn locked(initial: ContactDataset) -> Self {
        Self {
            fail_save: true,
            ..Self::new(initial)
        }
    }

    pub fn saved(&self) -> Option<ContactDataset> {
        self.saved.lock().unwrap().clone()
    }
}

impl ContactStore for MemoryStore {
    fn load(&self) -> Result<ContactDataset, DatasetError> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| self.initial.clone()))
    }

    fn save(&self, dataset: &ContactDataset) -> Result<(), DatasetError> {
        if self.fail_save {
            return Err(DatasetError::Write {
                path: "contactos.xlsx".into(),
                reason: "el archivo está bloqueado por otro proceso".to_string(),
            });
        }
        *self.saved.lock().unwrap() = Some(dataset.clone());
        Ok(())
    }
}

pub fn text(s: &str) -> CellValue {
    if s.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(s.to_string())
    }
}

/// Planilla con columnas Contacto, Empresa, Email_Destino, Enviado.
pub fn dataset(rows: &[(&str, &str, &str, &str)]) -> ContactDataset {
    let headers = ["Contacto", "Empresa", "Email_Destino", "Enviado"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = rows
        .iter()
        .map(|(c, e, m, s)| vec![text(c), text(e), text(m), text(s)])
        .collect();
    ContactDataset::new("Contactos", headers, rows).unwrap()
}
