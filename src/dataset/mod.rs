pub mod convert;
pub mod date_parser;
pub mod load;
pub mod store;
pub mod utils;

pub use store::DatasetStore;

use crate::error::{Error, Result};
use crate::rollup::RollupFilter;
use arrow::{
    array::{Array, ArrayRef, Float64Array, StringArray},
    record_batch::RecordBatch,
};
use std::{fs, path::Path};
use tracing::info;

/// Column names of the retail sales source table.
pub mod columns {
    pub const BRAND: &str = "Brand";
    pub const PACK_TYPE: &str = "PackType";
    pub const PPG: &str = "PPG";
    pub const CHANNEL: &str = "Channel";
    pub const YEAR: &str = "Year";
    pub const MONTH: &str = "Month";
    pub const WEEK: &str = "Week";
    pub const SALES_VALUE: &str = "SalesValue";
    pub const VOLUME: &str = "Volume";
    pub const VOLUME_UNITS: &str = "VolumeUnits";
    pub const DATE: &str = "date";

    /// Columns coerced to `Float64` at load.
    pub const NUMERIC: [&str; 6] = [SALES_VALUE, VOLUME, VOLUME_UNITS, YEAR, MONTH, WEEK];

    /// Columns offered in the filter catalog by default.
    pub const FILTERABLE: [&str; 5] = [BRAND, PACK_TYPE, PPG, CHANNEL, YEAR];

    pub fn is_numeric(name: &str) -> bool {
        NUMERIC.contains(&name)
    }
}

/// The normalized source table. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
    rollup: RollupFilter,
    filter_columns: Vec<String>,
}

impl Dataset {
    pub fn new(batch: RecordBatch) -> Self {
        Self {
            batch,
            rollup: RollupFilter::default(),
            filter_columns: columns::FILTERABLE.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Build from an in-memory CSV buffer.
    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        let batch = load::read_csv(data).map_err(|e| Error::unavailable("<memory>", e))?;
        Ok(Self::new(batch))
    }

    /// Read and normalize the CSV file at `path`.
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::unavailable(path, "data file not found"));
        }
        let data = fs::read(path).map_err(|e| Error::unavailable(path, e))?;
        let batch = load::read_csv(&data).map_err(|e| Error::unavailable(path, e))?;
        info!(
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            "data loaded"
        );
        Ok(Self::new(batch))
    }

    pub fn with_rollup(mut self, rollup: RollupFilter) -> Self {
        self.rollup = rollup;
        self
    }

    pub fn with_filter_columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.has_column(n))
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn rollup(&self) -> &RollupFilter {
        &self.rollup
    }

    pub fn filter_columns(&self) -> &[String] {
        &self.filter_columns
    }
}

/// A per-query filtered copy of the dataset.
#[derive(Debug, Clone)]
pub struct FilteredView {
    batch: RecordBatch,
}

impl FilteredView {
    pub(crate) fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    pub fn f64_column(&self, name: &str) -> Option<&Float64Array> {
        self.column(name)?.as_any().downcast_ref::<Float64Array>()
    }

    pub fn str_column(&self, name: &str) -> Option<&StringArray> {
        self.column(name)?.as_any().downcast_ref::<StringArray>()
    }

    /// Number of non-null values in `name`, 0 if the column is absent.
    pub fn count_valid(&self, name: &str) -> usize {
        self.column(name)
            .map(|c| c.len() - c.null_count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_path_missing_file() {
        let err = Dataset::from_path(Path::new("/no/such/sales.csv")).unwrap_err();
        assert!(matches!(err, Error::DataUnavailable { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_from_path_reads_file() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "Brand,Year,SalesValue")?;
        writeln!(tmp, "A,2023,1.5")?;
        let ds = Dataset::from_path(tmp.path())?;
        assert_eq!(ds.num_rows(), 1);
        assert!(ds.has_columns(&[columns::BRAND, columns::YEAR]));
        assert!(!ds.has_column(columns::VOLUME));
        Ok(())
    }

    #[test]
    fn test_unparseable_source_is_unavailable() {
        let err = Dataset::from_csv_bytes(b"").unwrap_err();
        assert!(matches!(err, Error::DataUnavailable { .. }));
    }

    #[test]
    fn test_builder_overrides() {
        let ds = Dataset::from_csv_bytes(b"Brand\nA\n")
            .unwrap()
            .with_rollup(RollupFilter::new(["Total"]))
            .with_filter_columns(["Brand"]);
        assert!(ds.rollup().is_rollup("Total"));
        assert_eq!(ds.filter_columns(), &["Brand".to_string()]);
        assert_eq!(ds.column_names(), vec!["Brand".to_string()]);
    }
}
