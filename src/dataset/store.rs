use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::rollup::RollupFilter;
use once_cell::sync::OnceCell;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Owns the process-wide dataset. Loads it on first `load()` and hands out
/// the same `Arc` from then on; racing first callers block until the single
/// load finishes.
pub struct DatasetStore {
    path: PathBuf,
    rollup: RollupFilter,
    filter_columns: Vec<String>,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let defaults = AppConfig::default();
        Self {
            path: path.into(),
            rollup: defaults.rollup_filter(),
            filter_columns: defaults.filter_columns,
            cell: OnceCell::new(),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            path: cfg.data_file_path.clone(),
            rollup: cfg.rollup_filter(),
            filter_columns: cfg.filter_columns.clone(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn load(&self) -> Result<Arc<Dataset>> {
        self.cell
            .get_or_try_init(|| {
                let ds = Dataset::from_path(&self.path)?
                    .with_rollup(self.rollup.clone())
                    .with_filter_columns(self.filter_columns.iter().cloned());
                Ok::<_, Error>(Arc::new(ds))
            })
            .cloned()
    }
}
