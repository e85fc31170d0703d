//! models/campaign_model.rs
//! Resultado de una corrida: estado terminal por fila y resumen final.

use std::path::Path;

use log::Level;

use crate::errors::{DatasetError, RenderError, SendError};

/// Estado terminal de una fila (PENDING -> uno de estos).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Skipped,
    RenderFailed(RenderError),
    Sent,
    SendFailed(SendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    /// Posición de la fila en la planilla (0 = primera fila de datos)
    pub index: usize,
    pub recipient: Option<String>,
    pub outcome: RecordOutcome,
}

#[derive(Debug)]
pub struct CampaignReport {
    pub records: Vec<RecordReport>,
    /// `Err` si la planilla no se pudo re-guardar; los envíos ya hechos no se revierten
    pub save_result: Result<(), DatasetError>,
}

impl CampaignReport {
    fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Sent))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Skipped))
    }

    pub fn render_failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::RenderFailed(_)))
    }

    pub fn send_failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::SendFailed(_)))
    }

    pub fn saved(&self) -> bool {
        self.save_result.is_ok()
    }

    /// Líneas de cierre para la consola: filas pendientes, resumen y estado del guardado.
    pub fn console_lines(&self, dataset_path: &Path) -> Vec<(Level, String)> {
        let mut lines = Vec::new();

        for record in &self.records {
            let reason = match &record.outcome {
                RecordOutcome::RenderFailed(e) => e.to_string(),
                RecordOutcome::SendFailed(e) => e.to_string(),
                RecordOutcome::Skipped | RecordOutcome::Sent => continue,
            };
            lines.push((
                Level::Warn,
                format!(
                    "Pendiente para la próxima corrida: fila {} <{}> ({})",
                    record.index + 1,
                    record.recipient.as_deref().unwrap_or("sin email"),
                    reason
                ),
            ));
        }

        lines.push((
            Level::Info,
            format!(
                "Resumen: {} enviados, {} ya enviados, {} con datos incompletos, {} fallidos",
                self.sent(),
                self.skipped(),
                self.render_failed(),
                self.send_failed()
            ),
        ));

        lines.push(match &self.save_result {
            Ok(()) => (
                Level::Info,
                format!(
                    "PROCESO COMPLETADO: la planilla {:?} fue actualizada y guardada",
                    dataset_path
                ),
            ),
            Err(e) => (
                Level::Warn,
                format!(
                    "ADVERTENCIA: no se pudo guardar la planilla (¿está abierta en otro programa?). \
                     Los {} envíos de esta corrida no quedaron registrados: {}",
                    self.sent(),
                    e
                ),
            ),
        });

        lines
    }
}
