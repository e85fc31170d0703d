//! models/contact_model.rs
//! Planilla de contactos en memoria: encabezados + filas, en el orden original.

use crate::errors::DatasetError;

pub const COL_CONTACT: &str = "Contacto";
pub const COL_COMPANY: &str = "Empresa";
pub const COL_EMAIL: &str = "Email_Destino";
pub const COL_SENT: &str = "Enviado";

/// Valor que marca una fila como ya enviada
pub const SENT_MARKER: &str = "SI";

/// Valor de una celda tal como vino de la planilla.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    /// Número de serie de Excel de una celda con formato de fecha/hora
    DateTime(f64),
    Bool(bool),
}

impl CellValue {
    /// Texto "útil" de la celda; `None` si está vacía o solo tiene espacios.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            CellValue::Empty => return None,
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            CellValue::Number(n) | CellValue::DateTime(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentFlag {
    Yes,
    NotYet,
}

impl SentFlag {
    pub fn from_cell(cell: Option<&CellValue>) -> Self {
        match cell {
            Some(CellValue::Text(s)) if s.trim() == SENT_MARKER => SentFlag::Yes,
            _ => SentFlag::NotYet,
        }
    }
}

/// Vista de una fila con los campos que usa la campaña.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub contact_name: Option<String>,
    pub company: Option<String>,
    pub destination_email: Option<String>,
    pub sent_flag: SentFlag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDataset {
    pub sheet_name: String,
    /// Celda (fila, columna) donde empieza el encabezado dentro de la hoja
    origin: (u32, u32),
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    contact_col: usize,
    company_col: usize,
    email_col: usize,
    sent_col: Option<usize>,
}

impl ContactDataset {
    /// Valida que existan las columnas requeridas y normaliza el ancho de las filas.
    pub fn new(
        sheet_name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()));

        let contact_col = require(COL_CONTACT)?;
        let company_col = require(COL_COMPANY)?;
        let email_col = require(COL_EMAIL)?;
        let sent_col = find(COL_SENT);

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Ok(Self {
            sheet_name: sheet_name.into(),
            origin: (0, 0),
            headers,
            rows,
            contact_col,
            company_col,
            email_col,
            sent_col,
        })
    }

    pub fn with_origin(mut self, row: u32, col: u32) -> Self {
        self.origin = (row, col);
        self
    }

    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<ContactRecord> {
        let row = self.rows.get(index)?;
        Some(ContactRecord {
            contact_name: row[self.contact_col].as_text(),
            company: row[self.company_col].as_text(),
            destination_email: row[self.email_col].as_text(),
            sent_flag: SentFlag::from_cell(self.sent_col.map(|c| &row[c])),
        })
    }

    /// Marca la fila como enviada. Si la columna `Enviado` no existe se agrega al final.
    pub fn mark_sent(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        let col = match self.sent_col {
            Some(col) => col,
            None => {
                self.headers.push(COL_SENT.to_string());
                for row in &mut self.rows {
                    row.push(CellValue::Empty);
                }
                let col = self.headers.len() - 1;
                self.sent_col = Some(col);
                col
            }
        };
        self.rows[index][col] = CellValue::Text(SENT_MARKER.to_string());
    }
}
