//! services/template_service.rs

use std::{fs, io::ErrorKind, path::Path};

use crate::{errors::TemplateError, models::template_model::Template};

/// Lee la plantilla completa (UTF-8) desde disco.
pub fn load_template(path: &Path) -> Result<Template, TemplateError> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            log::debug!("Plantilla cargada desde {:?} ({} bytes)", path, raw.len());
            Ok(Template::new(raw))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(TemplateError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(TemplateError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
