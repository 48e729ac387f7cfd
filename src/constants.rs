/// Input and output file names used when no `clinicas.toml` overrides them.
pub const WORKBOOK_FILE: &str = "DIREX GEAP Credenciados CSV Template 2208 - com especialidades.xlsx";
pub const CLINICS_LOCATION_CSV: &str = "geap_clinicas_localidade_json.csv";

pub const CLINICS_FINAL_CSV: &str = "clinicas_supabase_final.csv";
pub const CLINICS_CSV: &str = "clinicas.csv";
pub const CLINIC_SPECIALTIES_CSV: &str = "clinicas_especialidades.csv";
pub const NORMALIZED_SPECIALTIES_CSV: &str = "especialidades_normalizadas.csv";

pub const CONFIG_FILE: &str = "clinicas.toml";

// Sheet names inside the DIREX workbook
pub const SHEET_PROVIDERS_WITH_SPECIALTY: &str = "Credenciados + Especialidade";
pub const SHEET_UNITS: &str = "Unidades";
pub const SHEET_PROVIDERS: &str = "Credenciados";

/// Suffix appended to every non-empty assembled address
pub const COUNTRY_SUFFIX: &str = "Brasil";

/// Column headers as they appear in the DIREX workbook.
pub mod direx {
    pub const CNPJ: &str = "CNPJ (só números)";
    pub const RAZAO_SOCIAL: &str = "Razão Social";
    pub const NOME_FANTASIA: &str = "Nome Fantasia";

    pub const FISCAL_STREET: &str = "Logradouro do Endereço Fiscal";
    pub const FISCAL_NUMBER: &str = "Número do Endereço Fiscal";
    pub const FISCAL_COMPLEMENT: &str = "Complemento do Endereço Fiscal";
    pub const FISCAL_NEIGHBORHOOD: &str = "Bairro do Endereço Fiscal";
    pub const FISCAL_CITY: &str = "Cidade do Endereço Fiscal";
    pub const FISCAL_STATE: &str = "UF do Endereço Fiscal";
    pub const RESPONSIBLE_PHONE: &str = "Telefone do contato responsável";
    pub const RESPONSIBLE_EMAIL: &str = "E-mail do contato responsável";

    pub const UNIT_STREET: &str = "Logradouro";
    pub const UNIT_NUMBER: &str = "Número";
    pub const UNIT_COMPLEMENT: &str = "Complemento";
    pub const UNIT_NEIGHBORHOOD: &str = "Bairro";
    pub const UNIT_CITY: &str = "Cidade";
    pub const UNIT_STATE: &str = "UF (sigla)";
    pub const UNIT_LATITUDE: &str = "Latitude (opcional), exemplo: -22.4353231";
    pub const UNIT_LONGITUDE: &str = "Longitude (opcional), exemplo: -22.4353231";
    pub const UNIT_PHONES: &str = "Telefones contato (padrão DDD+número com 8 ou 9 dígitos, separado por vírgula exemplo: 11998732214, 1940142526)";
    pub const UNIT_EMAILS: &str = "E-mails (lista separada por vírgula)";
}

/// Column headers of the upstream clinic-location CSV.
pub mod location {
    pub const CNPJ: &str = "cnpj";
    pub const RAZAO_SOCIAL: &str = "razao_social";
    pub const NOME_FANTASIA: &str = "nome_fantasia";
    pub const LOGRADOURO: &str = "logradouro";
    pub const NUMERO: &str = "numero";
    pub const COMPLEMENTO: &str = "complemento";
    pub const BAIRRO: &str = "bairro";
    pub const CIDADE: &str = "cidade";
    pub const UF: &str = "uf";
    pub const DADOS_CBO: &str = "dados_cbo";
}

/// Output headers, in column order.
pub const CLINICS_FINAL_HEADERS: [&str; 14] = [
    "cnpj",
    "razao_social",
    "nome_fantasia",
    "logradouro",
    "numero",
    "complemento",
    "bairro",
    "cidade",
    "uf",
    "telefone",
    "email",
    "latitude",
    "longitude",
    "endereco_completo",
];

pub const CLINICS_HEADERS: [&str; 11] = [
    "cnpj",
    "razao_social",
    "nome_fantasia",
    "logradouro",
    "numero",
    "complemento",
    "bairro",
    "cidade",
    "uf",
    "telefone",
    "email",
];

pub const CLINIC_SPECIALTIES_HEADERS: [&str; 5] = [
    "cnpj",
    "cbo",
    "profissao",
    "especialidade_original",
    "especialidade",
];

pub const NORMALIZED_SPECIALTIES_HEADERS: [&str; 2] = ["especialidade_original", "especialidade"];
