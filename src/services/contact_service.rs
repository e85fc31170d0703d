//! services/contact_service.rs
//! Persistencia de la planilla de contactos. El mismo archivo es entrada y
//! "base de datos" del flag `Enviado`.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::{
    errors::DatasetError,
    models::contact_model::{CellValue, ContactDataset},
};

/// Formatos con los que se re-escriben las celdas de fecha
const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

pub trait ContactStore {
    fn load(&self) -> Result<ContactDataset, DatasetError>;
    fn save(&self, dataset: &ContactDataset) -> Result<(), DatasetError>;
}

/// Planilla en disco: se lee la primera hoja (xlsx/xls/ods) y se re-escribe como xlsx.
#[derive(Debug, Clone)]
pub struct XlsxContactStore {
    path: PathBuf,
}

impl XlsxContactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_error(&self, reason: impl ToString) -> DatasetError {
        DatasetError::Parse {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl ToString) -> DatasetError {
        DatasetError::Write {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_workbook(&self, dataset: &ContactDataset) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(dataset.sheet_name.as_str())?;

        let date_format = Format::new().set_num_format(DATE_FORMAT);
        let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);
        let (first_row, first_col) = dataset.origin();

        for (col, header) in dataset.headers().iter().enumerate() {
            if !header.is_empty() {
                worksheet.write_string(first_row, col_num(first_col, col)?, header.as_str())?;
            }
        }

        for (i, row) in dataset.rows().iter().enumerate() {
            let row_num = u32::try_from(i + 1)
                .ok()
                .and_then(|r| first_row.checked_add(r))
                .ok_or(XlsxError::RowColumnLimitError)?;
            for (col, cell) in row.iter().enumerate() {
                let col = col_num(first_col, col)?;
                match cell {
                    CellValue::Empty => {}
                    CellValue::Text(s) => {
                        worksheet.write_string(row_num, col, s.as_str())?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row_num, col, *n)?;
                    }
                    CellValue::DateTime(n) => {
                        let format = if n.fract() == 0.0 {
                            &date_format
                        } else {
                            &datetime_format
                        };
                        worksheet.write_number_with_format(row_num, col, *n, format)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col, *b)?;
                    }
                }
            }
        }

        workbook.save(&self.path)
    }
}

fn col_num(first_col: u32, col: usize) -> Result<u16, XlsxError> {
    u32::try_from(col)
        .ok()
        .and_then(|c| first_col.checked_add(c))
        .and_then(|c| u16::try_from(c).ok())
        .ok_or(XlsxError::RowColumnLimitError)
}

/// Texto original del encabezado, sin recortar espacios.
fn header_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        other => cell_from_data(other).as_text().unwrap_or_default(),
    }
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

impl ContactStore for XlsxContactStore {
    fn load(&self) -> Result<ContactDataset, DatasetError> {
        if !self.path.exists() {
            return Err(DatasetError::NotFound(self.path.clone()));
        }

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.parse_error(e))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| self.parse_error("el archivo no tiene hojas"))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| self.parse_error(e))?;

        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| self.parse_error("la primera hoja está vacía"))?
            .iter()
            .map(header_text)
            .collect();

        let rows: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();

        let dataset =
            ContactDataset::new(sheet_name, headers, rows)?.with_origin(first_row, first_col);
        log::info!(
            "Planilla {:?} cargada: {} filas, columnas {:?}",
            self.path,
            dataset.len(),
            dataset.headers()
        );
        Ok(dataset)
    }

    fn save(&self, dataset: &ContactDataset) -> Result<(), DatasetError> {
        self.write_workbook(dataset)
            .map_err(|e| self.write_error(e))?;
        log::debug!("Planilla guardada en {:?}", self.path);
        Ok(())
    }
}
