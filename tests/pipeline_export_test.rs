use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use clinicas::app::{SpecialtiesUseCase, UnifyUseCase};
use clinicas::config::OutputConfig;
use clinicas::constants::{direx, SHEET_PROVIDERS, SHEET_PROVIDERS_WITH_SPECIALTY, SHEET_UNITS};
use clinicas::infra::{CsvExportAdapter, CsvLocationAdapter, InMemoryRegistry};
use clinicas::pipeline::Table;

fn registry() -> InMemoryRegistry {
    let providers_with_specialty = Table::from_rows(
        SHEET_PROVIDERS_WITH_SPECIALTY,
        [
            direx::CNPJ,
            direx::RAZAO_SOCIAL,
            direx::NOME_FANTASIA,
            direx::FISCAL_STREET,
            direx::FISCAL_NUMBER,
            direx::FISCAL_COMPLEMENT,
            direx::FISCAL_NEIGHBORHOOD,
            direx::FISCAL_CITY,
            direx::FISCAL_STATE,
            direx::RESPONSIBLE_PHONE,
            direx::RESPONSIBLE_EMAIL,
        ],
        vec![
            vec!["11222333000144", "Clínica Alfa Ltda", "Alfa", "Rua Fiscal", "100", "Sala 1", "Centro", "Niterói", "rj", "2126100000", "alfa@fiscal.com"],
            vec!["11222333000144", "Clínica Alfa Duplicada", "Alfa 2", "", "", "", "", "", "", "", ""],
            vec!["55666777000188", "Beta Saúde", "Beta", "", "", "", "", "", "", "nan", ""],
        ],
    );
    let units = Table::from_rows(
        SHEET_UNITS,
        [
            direx::CNPJ,
            direx::UNIT_STREET,
            direx::UNIT_NUMBER,
            direx::UNIT_NEIGHBORHOOD,
            direx::UNIT_CITY,
            direx::UNIT_STATE,
            direx::UNIT_LATITUDE,
            direx::UNIT_LONGITUDE,
            direx::UNIT_PHONES,
            direx::UNIT_EMAILS,
        ],
        vec![vec![
            "11222333000144", "Rua Gavião Peixoto", "70", "Icaraí", "", "", "-22.9035", "-43.1096", "21999990000", "",
        ]],
    );
    let providers = Table::from_rows(
        SHEET_PROVIDERS,
        [
            direx::CNPJ,
            direx::FISCAL_COMPLEMENT,
            direx::RESPONSIBLE_PHONE,
            direx::RESPONSIBLE_EMAIL,
        ],
        vec![
            vec!["11222333000144", "Sala 1", "2126100000.0", "alfa@fiscal.com"],
            vec!["55666777000188", "", "", ""],
        ],
    );

    InMemoryRegistry::new()
        .with_sheet(providers_with_specialty)
        .with_sheet(units)
        .with_sheet(providers)
}

const LOCATIONS_CSV: &str = "\u{feff}cnpj,razao_social,nome_fantasia,logradouro,numero,complemento,bairro,cidade,uf,dados_cbo
11222333000144,Clínica Alfa Ltda,Alfa,Rua Gavião Peixoto,70,,Icaraí,Niterói,RJ,\"{\"\"225125\"\": {\"\"profissao\"\": \"\"Médico\"\", \"\"especialidades\"\": [\"\"cardiologia\"\", \"\"\"\", \"\"alergista e imunologista\"\"]}}\"
55666777000188,Beta Saúde,Beta,Rua B,1,Loja 2,Centro,Recife,PE,\"{\"\"251510\"\": {\"\"profissao\"\": \"\"Psicólogo\"\", \"\"especialidades\"\": [\"\"(medicina)\"\", \"\"Cardiologia\"\"]}}\"
99888777000166,Gama,Gama,,,,,,,{not json
";

fn output_config(dir: &Path) -> OutputConfig {
    OutputConfig {
        dir: dir.to_path_buf(),
        ..OutputConfig::default()
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "{} lacks a BOM", path.display());
    Ok(String::from_utf8(bytes[3..].to_vec())?
        .lines()
        .map(str::to_string)
        .collect())
}

fn run_both(input: &Path, out: &Path) -> Result<()> {
    let mut export = CsvExportAdapter::new(output_config(out));
    UnifyUseCase::new(Box::new(registry())).run(&mut export)?;
    SpecialtiesUseCase::new(
        Box::new(registry()),
        Box::new(CsvLocationAdapter::new(input)),
    )
    .run(&mut export)?;
    Ok(())
}

#[test]
fn test_unify_writes_one_row_per_cnpj() -> Result<()> {
    let dir = tempdir()?;
    let mut export = CsvExportAdapter::new(output_config(dir.path()));

    let summary = UnifyUseCase::new(Box::new(registry())).run(&mut export)?;
    assert_eq!(summary.clinics_written, 2);
    assert_eq!(summary.duplicates_dropped, 1);

    let lines = read_lines(&dir.path().join("clinicas_supabase_final.csv"))?;
    assert_eq!(
        lines[0],
        "cnpj,razao_social,nome_fantasia,logradouro,numero,complemento,bairro,cidade,uf,telefone,email,latitude,longitude,endereco_completo"
    );
    assert_eq!(
        lines[1],
        "11222333000144,Clínica Alfa Ltda,Alfa,Rua Gavião Peixoto,70,Sala 1,Icaraí,Niterói,rj,21999990000,alfa@fiscal.com,-22.9035,-43.1096,\"Rua Gavião Peixoto, 70, Icaraí, Niterói, RJ, Brasil\""
    );
    assert_eq!(lines[2], "55666777000188,Beta Saúde,Beta,,,,,,,,,,,");
    assert_eq!(lines.len(), 3);
    Ok(())
}

#[test]
fn test_specialties_outputs() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("geap_clinicas_localidade_json.csv");
    fs::write(&input, LOCATIONS_CSV)?;
    let out = dir.path().join("out");

    let mut export = CsvExportAdapter::new(output_config(&out));
    let summary = SpecialtiesUseCase::new(
        Box::new(registry()),
        Box::new(CsvLocationAdapter::new(&input)),
    )
    .run(&mut export)?;
    assert_eq!(summary.payloads_skipped, 1);

    let clinics = read_lines(&out.join("clinicas.csv"))?;
    assert_eq!(
        clinics,
        vec![
            "cnpj,razao_social,nome_fantasia,logradouro,numero,complemento,bairro,cidade,uf,telefone,email",
            "11222333000144,Clínica Alfa Ltda,Alfa,Rua Gavião Peixoto,70,Sala 1,Icaraí,Niterói,RJ,2126100000,alfa@fiscal.com",
            "55666777000188,Beta Saúde,Beta,Rua B,1,Loja 2,Centro,Recife,PE,,",
            "99888777000166,Gama,Gama,,,,,,,,",
        ]
    );

    let facts = read_lines(&out.join("clinicas_especialidades.csv"))?;
    assert_eq!(
        facts,
        vec![
            "cnpj,cbo,profissao,especialidade_original,especialidade",
            "11222333000144,225125,Médico,cardiologia,Cardiologia",
            "11222333000144,225125,Médico,alergista e imunologista,Alergista e Imunologista",
            "55666777000188,251510,Psicólogo,(medicina),Medicina",
            "55666777000188,251510,Psicólogo,Cardiologia,Cardiologia",
        ]
    );

    let dictionary = read_lines(&out.join("especialidades_normalizadas.csv"))?;
    assert_eq!(
        dictionary,
        vec![
            "especialidade_original,especialidade",
            "(medicina),Medicina",
            "alergista e imunologista,Alergista e Imunologista",
            "cardiologia,Cardiologia",
            "Cardiologia,Cardiologia",
        ]
    );
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("geap_clinicas_localidade_json.csv");
    fs::write(&input, LOCATIONS_CSV)?;
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    run_both(&input, &first)?;
    run_both(&input, &second)?;

    for name in [
        "clinicas_supabase_final.csv",
        "clinicas.csv",
        "clinicas_especialidades.csv",
        "especialidades_normalizadas.csv",
    ] {
        assert_eq!(fs::read(first.join(name))?, fs::read(second.join(name))?, "{name} differs");
    }
    Ok(())
}

#[test]
fn test_missing_column_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("geap_clinicas_localidade_json.csv");
    fs::write(&input, "cnpj,razao_social\n1,X\n")?;
    let out = dir.path().join("out");

    let mut export = CsvExportAdapter::new(output_config(&out));
    let result = SpecialtiesUseCase::new(
        Box::new(registry()),
        Box::new(CsvLocationAdapter::new(&input)),
    )
    .run(&mut export);

    assert!(result.is_err());
    assert!(!out.join("clinicas.csv").exists());
    Ok(())
}
