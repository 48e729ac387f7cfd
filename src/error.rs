use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sheet '{sheet}' not found in {source_name}")]
    MissingSheet { sheet: String, source_name: String },

    #[error("Missing required column '{column}' in {table}")]
    MissingColumn { column: String, table: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
