use std::collections::HashMap;
use tracing::{debug, info, info_span};

use crate::app::ports::{ClinicLocationPort, ExportPort, RegistrySourcePort};
use crate::constants::{direx, location, SHEET_PROVIDERS};
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::processing::{cnpj_key, dedup_facts, extract_facts, plain_integer, LabelDictionary};
use crate::pipeline::Row;
use crate::types::{ClinicRow, NormalizationEntry, SpecialtyFact};

const LOCATION_COLUMNS: [&str; 10] = [
    location::CNPJ,
    location::RAZAO_SOCIAL,
    location::NOME_FANTASIA,
    location::LOGRADOURO,
    location::NUMERO,
    location::COMPLEMENTO,
    location::BAIRRO,
    location::CIDADE,
    location::UF,
    location::DADOS_CBO,
];

const PROVIDER_COLUMNS: [&str; 4] = [
    direx::CNPJ,
    direx::FISCAL_COMPLEMENT,
    direx::RESPONSIBLE_PHONE,
    direx::RESPONSIBLE_EMAIL,
];

/// Everything pipeline B produces, before it is written out
#[derive(Debug, Clone, Default)]
pub struct SpecialtiesOutput {
    pub clinics: Vec<ClinicRow>,
    pub facts: Vec<SpecialtyFact>,
    pub dictionary: Vec<NormalizationEntry>,
    pub payloads_skipped: usize,
    pub facts_before_dedup: usize,
}

/// Counts reported after a specialties run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtiesSummary {
    pub clinics_written: usize,
    pub payloads_skipped: usize,
    pub facts_emitted: usize,
    pub facts_written: usize,
    pub labels_normalized: usize,
}

impl From<&SpecialtiesOutput> for SpecialtiesSummary {
    fn from(output: &SpecialtiesOutput) -> Self {
        Self {
            clinics_written: output.clinics.len(),
            payloads_skipped: output.payloads_skipped,
            facts_emitted: output.facts_before_dedup,
            facts_written: output.facts.len(),
            labels_normalized: output.dictionary.len(),
        }
    }
}

/// Pipeline B: completes the clinic-location table with fiscal complement and
/// responsible contact, and explodes `dados_cbo` into normalized specialty
/// facts plus the label audit dictionary.
pub struct SpecialtiesUseCase {
    registry: Box<dyn RegistrySourcePort>,
    locations: Box<dyn ClinicLocationPort>,
}

impl SpecialtiesUseCase {
    pub fn new(
        registry: Box<dyn RegistrySourcePort>,
        locations: Box<dyn ClinicLocationPort>,
    ) -> Self {
        Self {
            registry,
            locations,
        }
    }

    pub fn build(&self) -> Result<SpecialtiesOutput> {
        let clinics = self.locations.clinic_locations()?;
        clinics.require_columns(&LOCATION_COLUMNS)?;
        let providers = self.registry.sheet(SHEET_PROVIDERS)?;
        providers.require_columns(&PROVIDER_COLUMNS)?;

        info!(
            "Loaded {} clinic rows and {} provider rows",
            clinics.len(),
            providers.len()
        );
        metrics::ingest::rows_loaded(clinics.name(), clinics.len());
        metrics::ingest::rows_loaded(providers.name(), providers.len());

        let providers = providers.dedup_first_by(|row| cnpj_key(row.get(direx::CNPJ)));
        let providers_by_cnpj: HashMap<String, Row<'_>> = providers
            .rows()
            .map(|row| (cnpj_key(row.get(direx::CNPJ)), row))
            .collect();

        let clinic_rows: Vec<ClinicRow> = clinics
            .rows()
            .map(|clinic| {
                let provider = providers_by_cnpj.get(&cnpj_key(clinic.get(location::CNPJ)));
                clinic_row(&clinic, provider)
            })
            .collect();

        let span = info_span!("extract_specialties");
        let _enter = span.enter();

        let mut dictionary = LabelDictionary::new();
        let mut facts = Vec::new();
        let mut payloads_skipped = 0;
        for clinic in clinics.rows() {
            let cnpj = clinic.get(location::CNPJ);
            match extract_facts(cnpj, clinic.get(location::DADOS_CBO), &mut dictionary) {
                Some(found) => facts.extend(found),
                None => {
                    debug!(cnpj, "No usable dados_cbo payload");
                    payloads_skipped += 1;
                    metrics::specialties::payload_skipped();
                }
            }
        }

        let facts_before_dedup = facts.len();
        let facts = dedup_facts(facts);
        info!(
            "Extracted {} specialty facts ({} after dedup, {} rows without payload)",
            facts_before_dedup,
            facts.len(),
            payloads_skipped
        );
        metrics::specialties::facts_emitted(facts_before_dedup);
        metrics::specialties::facts_deduplicated(facts_before_dedup - facts.len());
        metrics::specialties::labels_canonicalized(dictionary.len());

        Ok(SpecialtiesOutput {
            clinics: clinic_rows,
            facts,
            dictionary: dictionary.into_sorted_entries(),
            payloads_skipped,
            facts_before_dedup,
        })
    }

    pub fn run(&self, output: &mut dyn ExportPort) -> Result<SpecialtiesSummary> {
        let result = self.build()?;

        output.write_clinic_rows(&result.clinics)?;
        output.write_specialty_facts(&result.facts)?;
        output.write_normalization_entries(&result.dictionary)?;

        Ok(SpecialtiesSummary::from(&result))
    }
}

fn clinic_row(clinic: &Row<'_>, provider: Option<&Row<'_>>) -> ClinicRow {
    let provider_value = |column: &str| provider.map(|row| row.get(column)).unwrap_or("");

    let own_complement = clinic.get(location::COMPLEMENTO);
    let complemento = if own_complement.trim().is_empty() {
        provider_value(direx::FISCAL_COMPLEMENT)
    } else {
        own_complement
    };

    ClinicRow {
        cnpj: clinic.get(location::CNPJ).to_string(),
        razao_social: clinic.get(location::RAZAO_SOCIAL).to_string(),
        nome_fantasia: clinic.get(location::NOME_FANTASIA).to_string(),
        logradouro: clinic.get(location::LOGRADOURO).to_string(),
        numero: clinic.get(location::NUMERO).to_string(),
        complemento: complemento.to_string(),
        bairro: clinic.get(location::BAIRRO).to_string(),
        cidade: clinic.get(location::CIDADE).to_string(),
        uf: clinic.get(location::UF).to_string(),
        telefone: plain_integer(provider_value(direx::RESPONSIBLE_PHONE)),
        email: provider_value(direx::RESPONSIBLE_EMAIL).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::infra::in_memory::{InMemoryExport, InMemoryRegistry};
    use crate::pipeline::Table;

    fn locations(rows: Vec<Vec<&str>>) -> Table {
        Table::from_rows("locations", LOCATION_COLUMNS, rows)
    }

    fn providers(rows: Vec<Vec<&str>>) -> Table {
        Table::from_rows(SHEET_PROVIDERS, PROVIDER_COLUMNS, rows)
    }

    fn use_case(locations: Table, providers: Table) -> SpecialtiesUseCase {
        SpecialtiesUseCase::new(
            Box::new(InMemoryRegistry::new().with_sheet(providers)),
            Box::new(InMemoryRegistry::new().with_locations(locations)),
        )
    }

    const PAYLOAD: &str = r#"{"225125": {"profissao": "Médico", "especialidades": ["cardiologia", "", "(medicina)"]}}"#;

    #[test]
    fn test_clinic_rows_take_contact_from_provider_sheet() {
        let uc = use_case(
            locations(vec![
                vec!["111", "Clínica A", "A", "Rua X", "1", "", "Centro", "Rio", "RJ", PAYLOAD],
                vec!["222", "Clínica B", "B", "Rua Y", "2", "Sala 3", "Icaraí", "Niterói", "RJ", ""],
            ]),
            providers(vec![
                vec!["111", "Bloco 2", "2133334444.0", "a@clinica.com"],
                vec!["222", "Loja 1", "1.1998732214E10", "b@clinica.com"],
            ]),
        );

        let output = uc.build().unwrap();
        assert_eq!(output.clinics[0].complemento, "Bloco 2");
        assert_eq!(output.clinics[0].telefone, "2133334444");
        assert_eq!(output.clinics[0].email, "a@clinica.com");
        assert_eq!(output.clinics[1].complemento, "Sala 3");
        assert_eq!(output.clinics[1].telefone, "11998732214");
    }

    #[test]
    fn test_clinic_without_provider_has_empty_contact() {
        let uc = use_case(
            locations(vec![vec!["333", "C", "C", "", "", "  ", "", "", "", ""]]),
            providers(vec![]),
        );

        let output = uc.build().unwrap();
        assert_eq!(output.clinics[0].telefone, "");
        assert_eq!(output.clinics[0].email, "");
        assert_eq!(output.clinics[0].complemento, "");
        assert_eq!(output.payloads_skipped, 1);
    }

    #[test]
    fn test_facts_dictionary_and_dedup() {
        let duplicate_payload = r#"{"225125": {"profissao": "Médico", "especialidades": ["Cardiologia"]}}"#;
        let uc = use_case(
            locations(vec![
                vec!["111", "A", "A", "", "", "", "", "", "", PAYLOAD],
                vec!["111", "A", "A", "", "", "", "", "", "", duplicate_payload],
                vec!["222", "B", "B", "", "", "", "", "", "", "{broken"],
            ]),
            providers(vec![]),
        );

        let output = uc.build().unwrap();
        let labels: Vec<_> = output.facts.iter().map(|f| f.especialidade.as_str()).collect();
        assert_eq!(labels, vec!["Cardiologia", "Medicina"]);
        assert_eq!(output.facts_before_dedup, 3);
        assert_eq!(output.payloads_skipped, 1);

        let originals: Vec<_> = output
            .dictionary
            .iter()
            .map(|e| e.especialidade_original.as_str())
            .collect();
        assert_eq!(originals, vec!["(medicina)", "cardiologia", "Cardiologia"]);
    }

    #[test]
    fn test_provider_join_ignores_zero_padding() {
        let uc = use_case(
            locations(vec![vec!["1234567000190", "A", "A", "", "", "", "", "", "", ""]]),
            providers(vec![vec!["01234567000190", "", "", "a@b.com"]]),
        );

        let output = uc.build().unwrap();
        assert_eq!(output.clinics[0].cnpj, "1234567000190");
        assert_eq!(output.clinics[0].email, "a@b.com");
    }

    #[test]
    fn test_run_writes_all_three_tables() {
        let uc = use_case(
            locations(vec![vec!["111", "A", "A", "", "", "", "", "", "", PAYLOAD]]),
            providers(vec![]),
        );
        let mut output = InMemoryExport::default();

        let summary = uc.run(&mut output).unwrap();
        assert_eq!(summary.clinics_written, 1);
        assert_eq!(summary.facts_written, 2);
        assert_eq!(summary.labels_normalized, 2);
        assert_eq!(output.clinic_rows.as_ref().map(Vec::len), Some(1));
        assert_eq!(output.specialty_facts.as_ref().map(Vec::len), Some(2));
        assert_eq!(output.normalization_entries.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_missing_payload_column_is_fatal() {
        let clinics = Table::from_rows("locations", [location::CNPJ], vec![vec!["1"]]);
        let uc = use_case(clinics, providers(vec![]));
        let mut output = InMemoryExport::default();

        assert!(matches!(uc.run(&mut output), Err(RegistryError::MissingColumn { .. })));
        assert!(output.clinic_rows.is_none());
    }
}
