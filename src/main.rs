use anyhow::{Context, Result};

use crate::config::campaign_config::CampaignConfig;
use crate::logger::init_logger;
use crate::services::campaign_service::run_campaign;
use crate::services::contact_service::XlsxContactStore;
use crate::services::email_service::SmtpMailer;

mod config;
mod errors;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logger();

    let config = CampaignConfig::from_env().context("Configuración incompleta")?;
    log::debug!("Configuración: {:?}", config);

    let store = XlsxContactStore::new(config.dataset_path.clone());
    let mailer = SmtpMailer::new(&config);

    let report = match run_campaign(&config.template_path, &store, &mailer, &config.subject).await
    {
        Ok(report) => report,
        Err(e) => {
            log::error!("Campaña abortada: {}", e);
            return Err(e.into());
        }
    };

    for (level, line) in report.console_lines(store.path()) {
        log::log!(level, "{}", line);
    }

    Ok(())
}
