use crate::dataset::columns;
use crate::rollup::RollupFilter;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable that overrides `data_file_path`.
pub const DATA_FILE_ENV: &str = "SALESDASH_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file_path: PathBuf,
    pub rollup_prefixes: Vec<String>,
    pub filter_columns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file_path: PathBuf::from("data/sales.csv"),
            rollup_prefixes: vec!["All".to_string()],
            filter_columns: columns::FILTERABLE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Read the YAML file at `path` if one is given, otherwise start from defaults,
    /// then apply the environment override.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => {
                let raw = fs::read_to_string(p)
                    .with_context(|| format!("reading config file {}", p.display()))?;
                Self::from_yaml(&raw)
                    .with_context(|| format!("parsing config file {}", p.display()))?
            }
            None => Self::default(),
        };
        if let Ok(v) = std::env::var(DATA_FILE_ENV) {
            if !v.trim().is_empty() {
                cfg.data_file_path = PathBuf::from(v.trim());
            }
        }
        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let cfg: AppConfig = serde_yaml::from_str(raw)?;
        Ok(cfg)
    }

    pub fn rollup_filter(&self) -> RollupFilter {
        RollupFilter::new(self.rollup_prefixes.iter().cloned())
    }
}
