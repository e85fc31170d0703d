//! models/template_model.rs

use crate::errors::RenderError;
use crate::models::contact_model::{COL_COMPANY, COL_CONTACT};

/// Texto de la plantilla con los placeholders `{Contacto}` y `{Empresa}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
}

impl Template {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Sustituye los placeholders tal cual, sin escapado. Cualquier otra llave queda intacta.
    pub fn render(
        &self,
        contact_name: Option<&str>,
        company: Option<&str>,
    ) -> Result<String, RenderError> {
        let contact_name = contact_name.ok_or(RenderError::MissingField(COL_CONTACT))?;
        let company = company.ok_or(RenderError::MissingField(COL_COMPANY))?;

        let contact_tag = format!("{{{COL_CONTACT}}}");
        let company_tag = format!("{{{COL_COMPANY}}}");

        // Una sola pasada: los valores insertados no se vuelven a escanear.
        let mut out = String::with_capacity(self.raw.len());
        let mut rest = self.raw.as_str();
        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if tail.starts_with(&contact_tag) {
                out.push_str(contact_name);
                rest = &tail[contact_tag.len()..];
            } else if tail.starts_with(&company_tag) {
                out.push_str(company);
                rest = &tail[company_tag.len()..];
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}
