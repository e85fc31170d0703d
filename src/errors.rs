//! errors.rs
//! Errores tipados de la campaña. Los fatales abortan la corrida completa;
//! `RenderError` y `SendError` se resuelven por fila y la corrida continúa.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("falta la variable de configuración {0}")]
    Missing(&'static str),
    #[error("valor inválido para {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("no se encontró el archivo de plantilla en la ruta: {0:?}")]
    NotFound(PathBuf),
    #[error("error al leer la plantilla {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("no se encontró el archivo de datos en la ruta: {0:?}")]
    NotFound(PathBuf),
    #[error("error al cargar la planilla {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("la planilla no tiene la columna requerida {0:?}")]
    MissingColumn(String),
    #[error("no se pudo guardar la planilla {path:?}: {reason}")]
    Write { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("falta el valor de la columna {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("dirección inválida: {0}")]
    InvalidAddress(String),
    #[error("no se pudo construir el mensaje: {0}")]
    Message(String),
    #[error("error SMTP: {0}")]
    Transport(String),
    #[error("timeout de {0}s enviando el email")]
    Timeout(u64),
}

/// Errores que abortan la campaña antes del bucle de envío.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
