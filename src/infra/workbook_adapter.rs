use calamine::{open_workbook_auto, Data, Reader};
use std::path::PathBuf;
use tracing::debug;

use crate::app::ports::RegistrySourcePort;
use crate::error::{RegistryError, Result};
use crate::pipeline::Table;

/// Reads sheets of the DIREX workbook (xlsx, xls or ods).
///
/// The first row of a sheet is its header row. Rows with no value at all are
/// skipped.
pub struct WorkbookAdapter {
    path: PathBuf,
}

impl WorkbookAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RegistrySourcePort for WorkbookAdapter {
    fn sheet(&self, name: &str) -> Result<Table> {
        let mut workbook = open_workbook_auto(&self.path)?;
        if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
            return Err(RegistryError::MissingSheet {
                sheet: name.to_string(),
                source_name: self.path.display().to_string(),
            });
        }

        let range = workbook.worksheet_range(name)?;
        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|header| header.iter().map(|cell| render_cell(cell).trim().to_string()).collect())
            .unwrap_or_default();

        let mut table = Table::new(name, headers);
        for row in rows {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }
            table.push_row(row.iter().map(render_cell).collect());
        }

        debug!(sheet = name, rows = table.len(), "Loaded workbook sheet");
        Ok(table)
    }
}

/// Renders a cell as text. Integral floats lose their fractional part so
/// CNPJs and phone numbers stored as numbers come out as plain digits.
pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e18 => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}
