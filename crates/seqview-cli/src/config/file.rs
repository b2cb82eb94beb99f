use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileDigestionConfig {
    pub enzyme: Option<String>,
    #[serde(rename = "enzyme-file")]
    pub enzyme_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileMassChargeConfig {
    #[serde(rename = "min-length")]
    pub min_length: Option<usize>,
    #[serde(rename = "excluded-residues")]
    pub excluded_residues: Option<String>,
    #[serde(rename = "charge-range")]
    pub charge_range: Option<(u8, u8)>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSearchConfig {
    #[serde(rename = "use-regex")]
    pub use_regex: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub digestion: Option<FileDigestionConfig>,
    #[serde(rename = "mass-charge")]
    pub mass_charge: Option<FileMassChargeConfig>,
    pub search: Option<FileSearchConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| CliError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }
}
