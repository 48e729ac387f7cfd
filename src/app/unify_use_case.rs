use std::collections::HashMap;
use tracing::{debug, info, instrument};

use crate::app::ports::{ExportPort, RegistrySourcePort};
use crate::constants::{direx, SHEET_PROVIDERS_WITH_SPECIALTY, SHEET_UNITS};
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::processing::{assemble, cnpj_key, coalesce, parse_coordinate, AddressParts};
use crate::pipeline::{Row, Table};
use crate::types::ClinicRecord;

// Column names of the merged provider + unit table
const CNPJ: &str = "cnpj";
const RAZAO_SOCIAL: &str = "razao_social";
const NOME_FANTASIA: &str = "nome_fantasia";
const LOGR_FISCAL: &str = "logr_fiscal";
const NUM_FISCAL: &str = "num_fiscal";
const COMPL_FISCAL: &str = "compl_fiscal";
const BAIRRO_FISCAL: &str = "bairro_fiscal";
const CIDADE_FISCAL: &str = "cidade_fiscal";
const UF_FISCAL: &str = "uf_fiscal";
const TEL_RESP: &str = "tel_resp";
const EMAIL_RESP: &str = "email_resp";
const LOGR_UNID: &str = "logr_unid";
const NUM_UNID: &str = "num_unid";
const COMPL_UNID: &str = "compl_unid";
const BAIRRO_UNID: &str = "bairro_unid";
const CIDADE_UNID: &str = "cidade_unid";
const UF_UNID: &str = "uf_unid";
const TEL_UNID: &str = "tel_unid";
const EMAIL_UNID: &str = "email_unid";
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";

/// Provider sheet columns carried into the merge, with their merged names.
const PROVIDER_COLUMNS: [(&str, &str); 11] = [
    (direx::CNPJ, CNPJ),
    (direx::RAZAO_SOCIAL, RAZAO_SOCIAL),
    (direx::NOME_FANTASIA, NOME_FANTASIA),
    (direx::FISCAL_STREET, LOGR_FISCAL),
    (direx::FISCAL_NUMBER, NUM_FISCAL),
    (direx::FISCAL_COMPLEMENT, COMPL_FISCAL),
    (direx::FISCAL_NEIGHBORHOOD, BAIRRO_FISCAL),
    (direx::FISCAL_CITY, CIDADE_FISCAL),
    (direx::FISCAL_STATE, UF_FISCAL),
    (direx::RESPONSIBLE_PHONE, TEL_RESP),
    (direx::RESPONSIBLE_EMAIL, EMAIL_RESP),
];

/// Unit sheet columns carried into the merge, with their merged names.
const UNIT_COLUMNS: [(&str, &str); 10] = [
    (direx::UNIT_STREET, LOGR_UNID),
    (direx::UNIT_NUMBER, NUM_UNID),
    (direx::UNIT_COMPLEMENT, COMPL_UNID),
    (direx::UNIT_NEIGHBORHOOD, BAIRRO_UNID),
    (direx::UNIT_CITY, CIDADE_UNID),
    (direx::UNIT_STATE, UF_UNID),
    (direx::UNIT_LATITUDE, LATITUDE),
    (direx::UNIT_LONGITUDE, LONGITUDE),
    (direx::UNIT_PHONES, TEL_UNID),
    (direx::UNIT_EMAILS, EMAIL_UNID),
];

/// Counts reported after a unify run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifySummary {
    pub provider_rows: usize,
    pub duplicates_dropped: usize,
    pub units_matched: usize,
    pub clinics_written: usize,
}

/// Pipeline A: one clinic per CNPJ from the provider sheet, with address and
/// contact data taken from the unit sheet whenever it has a value.
pub struct UnifyUseCase {
    source: Box<dyn RegistrySourcePort>,
}

impl UnifyUseCase {
    pub fn new(source: Box<dyn RegistrySourcePort>) -> Self {
        Self { source }
    }

    /// Loads both sheets and builds the clinic records without writing them.
    #[instrument(skip(self))]
    pub fn build_records(&self) -> Result<(Vec<ClinicRecord>, UnifySummary)> {
        let providers = self.source.sheet(SHEET_PROVIDERS_WITH_SPECIALTY)?;
        providers.require_columns(&[direx::CNPJ, direx::RAZAO_SOCIAL, direx::NOME_FANTASIA])?;
        let units = self.source.sheet(SHEET_UNITS)?;
        units.require_column(direx::CNPJ)?;

        info!(
            "Loaded {} provider rows and {} unit rows",
            providers.len(),
            units.len()
        );
        metrics::ingest::rows_loaded(providers.name(), providers.len());
        metrics::ingest::rows_loaded(units.name(), units.len());

        let unique_providers = providers.dedup_first_by(|row| cnpj_key(row.get(direx::CNPJ)));
        let unique_units = units.dedup_first_by(|row| cnpj_key(row.get(direx::CNPJ)));
        let duplicates_dropped = providers.len() - unique_providers.len();
        if duplicates_dropped > 0 {
            info!("Dropped {} duplicate provider rows", duplicates_dropped);
        }
        debug!(
            "Dropped {} duplicate unit rows",
            units.len() - unique_units.len()
        );
        metrics::unify::duplicates_dropped(providers.name(), duplicates_dropped);
        metrics::unify::duplicates_dropped(units.name(), units.len() - unique_units.len());

        let (merged, units_matched) = merge_units(&unique_providers, &unique_units);
        metrics::unify::units_matched(units_matched);

        let records: Vec<ClinicRecord> = merged.rows().map(|row| clinic_record(&row)).collect();

        let summary = UnifySummary {
            provider_rows: providers.len(),
            duplicates_dropped,
            units_matched,
            clinics_written: records.len(),
        };
        Ok((records, summary))
    }

    pub fn run(&self, output: &mut dyn ExportPort) -> Result<UnifySummary> {
        let (records, summary) = self.build_records()?;
        output.write_clinic_records(&records)?;
        info!("Wrote {} clinic records", records.len());
        Ok(summary)
    }
}

/// Left join of providers with units on the CNPJ key. Providers without a
/// unit get empty unit columns. Returns the merged table and the number of
/// providers that found a unit.
fn merge_units(providers: &Table, units: &Table) -> (Table, usize) {
    let units_by_cnpj: HashMap<String, Row<'_>> = units
        .rows()
        .map(|row| (cnpj_key(row.get(direx::CNPJ)), row))
        .collect();

    let headers = PROVIDER_COLUMNS
        .iter()
        .chain(UNIT_COLUMNS.iter())
        .map(|(_, merged)| merged.to_string())
        .collect();
    let mut merged = Table::new(format!("{} + {}", providers.name(), units.name()), headers);
    let mut matched = 0;

    for provider in providers.rows() {
        let unit = units_by_cnpj.get(&cnpj_key(provider.get(direx::CNPJ)));
        if unit.is_some() {
            matched += 1;
        }

        let mut cells: Vec<String> = PROVIDER_COLUMNS
            .iter()
            .map(|(source, _)| provider.get(source).to_string())
            .collect();
        cells.extend(UNIT_COLUMNS.iter().map(|(source, _)| {
            unit.map(|row| row.get(source)).unwrap_or("").to_string()
        }));
        merged.push_row(cells);
    }

    (merged, matched)
}

fn clinic_record(row: &Row<'_>) -> ClinicRecord {
    let logradouro = coalesce(row, &[LOGR_UNID, LOGR_FISCAL]);
    let numero = coalesce(row, &[NUM_UNID, NUM_FISCAL]);
    let complemento = coalesce(row, &[COMPL_UNID, COMPL_FISCAL]);
    let bairro = coalesce(row, &[BAIRRO_UNID, BAIRRO_FISCAL]);
    let cidade = coalesce(row, &[CIDADE_UNID, CIDADE_FISCAL]);
    let uf = coalesce(row, &[UF_UNID, UF_FISCAL]);

    let endereco_completo = assemble(&AddressParts {
        street: &logradouro,
        number: &numero,
        neighborhood: &bairro,
        city: &cidade,
        state: &uf,
    });

    ClinicRecord {
        cnpj: row.get(CNPJ).to_string(),
        razao_social: row.get(RAZAO_SOCIAL).to_string(),
        nome_fantasia: row.get(NOME_FANTASIA).to_string(),
        telefone: coalesce(row, &[TEL_UNID, TEL_RESP]),
        email: coalesce(row, &[EMAIL_UNID, EMAIL_RESP]),
        latitude: parse_coordinate(row.get(LATITUDE)),
        longitude: parse_coordinate(row.get(LONGITUDE)),
        logradouro,
        numero,
        complemento,
        bairro,
        cidade,
        uf,
        endereco_completo,
    }
}
