use std::collections::HashMap;

use crate::app::ports::{ClinicLocationPort, ExportPort, RegistrySourcePort};
use crate::error::{RegistryError, Result};
use crate::pipeline::Table;
use crate::types::{ClinicRecord, ClinicRow, NormalizationEntry, SpecialtyFact};

/// In-memory registry for development/testing. Sheets are keyed by table name.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRegistry {
    sheets: HashMap<String, Table>,
    locations: Option<Table>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, table: Table) -> Self {
        self.sheets.insert(table.name().to_string(), table);
        self
    }

    pub fn with_locations(mut self, table: Table) -> Self {
        self.locations = Some(table);
        self
    }
}

impl RegistrySourcePort for InMemoryRegistry {
    fn sheet(&self, name: &str) -> Result<Table> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::MissingSheet {
                sheet: name.to_string(),
                source_name: "in-memory registry".to_string(),
            })
    }
}

impl ClinicLocationPort for InMemoryRegistry {
    fn clinic_locations(&self) -> Result<Table> {
        self.locations
            .clone()
            .ok_or_else(|| RegistryError::Config("no clinic locations loaded".to_string()))
    }
}

/// Captures exported tables; `None` means the table was never written.
#[derive(Debug, Default, Clone)]
pub struct InMemoryExport {
    pub clinic_records: Option<Vec<ClinicRecord>>,
    pub clinic_rows: Option<Vec<ClinicRow>>,
    pub specialty_facts: Option<Vec<SpecialtyFact>>,
    pub normalization_entries: Option<Vec<NormalizationEntry>>,
}

impl ExportPort for InMemoryExport {
    fn write_clinic_records(&mut self, records: &[ClinicRecord]) -> Result<()> {
        self.clinic_records = Some(records.to_vec());
        Ok(())
    }

    fn write_clinic_rows(&mut self, rows: &[ClinicRow]) -> Result<()> {
        self.clinic_rows = Some(rows.to_vec());
        Ok(())
    }

    fn write_specialty_facts(&mut self, facts: &[SpecialtyFact]) -> Result<()> {
        self.specialty_facts = Some(facts.to_vec());
        Ok(())
    }

    fn write_normalization_entries(&mut self, entries: &[NormalizationEntry]) -> Result<()> {
        self.normalization_entries = Some(entries.to_vec());
        Ok(())
    }
}
