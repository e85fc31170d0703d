//! services/campaign_service.rs
//! Orquesta la campaña: plantilla -> planilla -> (por fila) render + envío + marca -> guardado.

use std::path::Path;

use crate::{
    errors::{CampaignError, RenderError},
    models::{
        campaign_model::{CampaignReport, RecordOutcome, RecordReport},
        contact_model::{ContactDataset, SentFlag, COL_EMAIL},
        template_model::Template,
    },
    services::{
        contact_service::ContactStore, email_service::Mailer, template_service::load_template,
    },
};

/// Corre la campaña completa. Solo la plantilla y la carga de la planilla son fatales;
/// un error al guardar queda en el reporte.
pub async fn run_campaign<S, M>(
    template_path: &Path,
    store: &S,
    mailer: &M,
    subject: &str,
) -> Result<CampaignReport, CampaignError>
where
    S: ContactStore,
    M: Mailer,
{
    let template = load_template(template_path)?;
    let mut dataset = store.load()?;
    if dataset.is_empty() {
        log::warn!("La planilla no tiene filas de contactos");
    }

    let records = process_dataset(&mut dataset, &template, mailer, subject).await;

    // Un solo intento de guardado, pase lo que pase con los envíos.
    let save_result = store.save(&dataset);

    Ok(CampaignReport {
        records,
        save_result,
    })
}

/// Recorre las filas en orden; ninguna falla individual detiene el bucle.
pub async fn process_dataset<M: Mailer>(
    dataset: &mut ContactDataset,
    template: &Template,
    mailer: &M,
    subject: &str,
) -> Vec<RecordReport> {
    let mut reports = Vec::with_capacity(dataset.len());

    for index in 0..dataset.len() {
        let Some(record) = dataset.record(index) else {
            continue;
        };
        let label = format!(
            "{} ({})",
            record.contact_name.as_deref().unwrap_or("?"),
            record.company.as_deref().unwrap_or("?")
        );

        let outcome = if record.sent_flag == SentFlag::Yes {
            log::info!("Saltando contacto {}: ya fue enviado", label);
            RecordOutcome::Skipped
        } else {
            let rendered = template
                .render(record.contact_name.as_deref(), record.company.as_deref())
                .and_then(|body| {
                    record
                        .destination_email
                        .clone()
                        .map(|to| (to, body))
                        .ok_or(RenderError::MissingField(COL_EMAIL))
                });

            match rendered {
                Err(e) => {
                    log::warn!("Fila {} {}: {}. Se salta la fila", index + 1, label, e);
                    RecordOutcome::RenderFailed(e)
                }
                Ok((to, body)) => match mailer.send(&to, subject, &body).await {
                    Ok(()) => {
                        dataset.mark_sent(index);
                        RecordOutcome::Sent
                    }
                    Err(e) => RecordOutcome::SendFailed(e),
                },
            }
        };

        reports.push(RecordReport {
            index,
            recipient: record.destination_email,
            outcome,
        });
    }

    reports
}
