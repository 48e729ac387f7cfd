use crate::constants;
use crate::error::{RegistryError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub workbook: PathBuf,
    pub clinics_csv: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub clinics_final: String,
    pub clinics: String,
    pub specialties: String,
    pub dictionary: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from(constants::WORKBOOK_FILE),
            clinics_csv: PathBuf::from(constants::CLINICS_LOCATION_CSV),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            clinics_final: constants::CLINICS_FINAL_CSV.to_string(),
            clinics: constants::CLINICS_CSV.to_string(),
            specialties: constants::CLINIC_SPECIALTIES_CSV.to_string(),
            dictionary: constants::NORMALIZED_SPECIALTIES_CSV.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn clinics_final_path(&self) -> PathBuf {
        self.dir.join(&self.clinics_final)
    }

    pub fn clinics_path(&self) -> PathBuf {
        self.dir.join(&self.clinics)
    }

    pub fn specialties_path(&self) -> PathBuf {
        self.dir.join(&self.specialties)
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.dir.join(&self.dictionary)
    }
}

impl Config {
    /// Loads `clinicas.toml` from the working directory, falling back to the
    /// built-in file names when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(constants::CONFIG_FILE))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path).map_err(|e| {
            RegistryError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
