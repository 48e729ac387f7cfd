use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::ports::{ClinicLocationPort, ExportPort};
use crate::config::OutputConfig;
use crate::constants::{
    CLINICS_FINAL_HEADERS, CLINICS_HEADERS, CLINIC_SPECIALTIES_HEADERS,
    NORMALIZED_SPECIALTIES_HEADERS,
};
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::Table;
use crate::types::{ClinicRecord, ClinicRow, NormalizationEntry, SpecialtyFact};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads the upstream clinic-location CSV (`geap_clinicas_localidade_json.csv`).
pub struct CsvLocationAdapter {
    path: PathBuf,
}

impl CsvLocationAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClinicLocationPort for CsvLocationAdapter {
    fn clinic_locations(&self) -> Result<Table> {
        read_table(&self.path)
    }
}

/// Loads a headed CSV file into a [`Table`], ignoring a leading BOM.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut table = Table::new(path.display().to_string(), headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect());
    }

    debug!(path = %path.display(), rows = table.len(), "Loaded CSV table");
    Ok(table)
}

/// Writes the export tables as UTF-8 CSV with a byte-order mark, one file
/// per table under the configured output directory.
pub struct CsvExportAdapter {
    output: OutputConfig,
}

impl CsvExportAdapter {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }
}

impl ExportPort for CsvExportAdapter {
    fn write_clinic_records(&mut self, records: &[ClinicRecord]) -> Result<()> {
        write_csv(&self.output.clinics_final_path(), &CLINICS_FINAL_HEADERS, records)
    }

    fn write_clinic_rows(&mut self, rows: &[ClinicRow]) -> Result<()> {
        write_csv(&self.output.clinics_path(), &CLINICS_HEADERS, rows)
    }

    fn write_specialty_facts(&mut self, facts: &[SpecialtyFact]) -> Result<()> {
        write_csv(&self.output.specialties_path(), &CLINIC_SPECIALTIES_HEADERS, facts)
    }

    fn write_normalization_entries(&mut self, entries: &[NormalizationEntry]) -> Result<()> {
        write_csv(&self.output.dictionary_path(), &NORMALIZED_SPECIALTIES_HEADERS, entries)
    }
}

/// Writes `rows` under an explicit header row, so empty tables still get
/// their header.
pub fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    metrics::export::rows_written(file_name, rows.len());
    debug!(path = %path.display(), rows = rows.len(), "Wrote CSV file");
    Ok(())
}
