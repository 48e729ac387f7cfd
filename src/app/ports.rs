use crate::error::Result;
use crate::pipeline::Table;
use crate::types::{ClinicRecord, ClinicRow, NormalizationEntry, SpecialtyFact};

/// Sheets of the DIREX provider workbook.
pub trait RegistrySourcePort {
    /// Loads a whole sheet; a missing sheet is an error.
    fn sheet(&self, name: &str) -> Result<Table>;
}

/// The upstream clinic-location table carrying the `dados_cbo` payload.
pub trait ClinicLocationPort {
    fn clinic_locations(&self) -> Result<Table>;
}

/// Destination for the exported tables. Each method replaces the previous
/// content of its target.
pub trait ExportPort {
    fn write_clinic_records(&mut self, records: &[ClinicRecord]) -> Result<()>;
    fn write_clinic_rows(&mut self, rows: &[ClinicRow]) -> Result<()>;
    fn write_specialty_facts(&mut self, facts: &[SpecialtyFact]) -> Result<()>;
    fn write_normalization_entries(&mut self, entries: &[NormalizationEntry]) -> Result<()>;
}
