// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Source file name kept as published by INEP.
pub const DATA_FILENAME: &str = "divulgacao_anos_finais_municipios_2023 (1).xlsx";

/// Municipalities of the Baixada Santista region.
pub const BAIXADA_SANTISTA: &[&str] = &[
    "Cubatão",
    "Praia Grande",
    "Santos",
    "São Vicente",
    "Guarujá",
    "Bertioga",
    "Itanhaém",
    "Mongaguá",
    "Peruíbe",
];

/// Two pre-pandemic years and the first pandemic-affected one.
pub const RELEVANT_YEARS: &[i32] = &[2017, 2019, 2021];

/// Header labels of the columns the transform keeps, exactly as the source
/// spells them after whitespace trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub municipality: String,
    pub network: String,
    /// Approval-rate column label per year.
    pub rates: BTreeMap<i32, String>,
}

impl ColumnConfig {
    pub fn rate_label(&self, year: i32) -> Option<&str> {
        self.rates.get(&year).map(String::as_str)
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        let rates = [
            (2017, "Taxa de Aprovação - 2017"),
            (2019, "Taxa de Aprovação - 2019"),
            // the source appends footnote marker "2" to this header
            (2021, "Taxa de Aprovação - 20212"),
        ]
        .into_iter()
        .map(|(year, label)| (year, label.to_string()))
        .collect();

        Self {
            municipality: "Nome do Município".into(),
            network: "Rede".into(),
            rates,
        }
    }
}

/// Run configuration. Every field can be overridden from a YAML file;
/// omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    /// Title/metadata rows above the header row.
    pub skip_rows: usize,
    pub municipalities: Vec<String>,
    pub years: Vec<i32>,
    pub columns: ColumnConfig,
    /// Fail when a configured rate column is absent instead of dropping that year.
    pub strict_columns: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: Path::new("data").join(DATA_FILENAME),
            output_dir: PathBuf::from("interface_web"),
            skip_rows: 6,
            municipalities: BAIXADA_SANTISTA.iter().map(|m| m.to_string()).collect(),
            years: RELEVANT_YEARS.to_vec(),
            columns: ColumnConfig::default(),
            strict_columns: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("parsing pipeline configuration")
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading configuration file {:?}", path))?;
        Self::from_yaml_str(&text).with_context(|| format!("in {:?}", path))
    }
}
