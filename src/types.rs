use serde::{Deserialize, Serialize};

/// One clinic per CNPJ, as exported to `clinicas_supabase_final.csv`.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicRecord {
    pub cnpj: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub telefone: String,
    pub email: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco_completo: String,
}

/// A clinic row of `clinicas.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicRow {
    pub cnpj: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub telefone: String,
    pub email: String,
}

/// Clinic x occupation code x specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyFact {
    pub cnpj: String,
    pub cbo: String,
    pub profissao: String,
    pub especialidade_original: String,
    pub especialidade: String,
}

/// Audit entry: a raw specialty label and the canonical label it became.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationEntry {
    pub especialidade_original: String,
    pub especialidade: String,
}
