//! logger.rs
//! Configuración del logger usando env_logger.

pub fn init_logger() {
    // La consola es el único reporte de la campaña: el progreso por fila y el resumen
    // salen en "info", así que ese es el mínimo si RUST_LOG no está definida.
    let log_env = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_env))
        .format_timestamp_secs()
        .init();
}
