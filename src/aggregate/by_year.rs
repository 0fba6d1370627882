use crate::aggregate::{group_sum, truncate, YearValue};
use crate::dataset::{columns, Dataset};
use crate::error::Result;
use crate::filter::{apply_filters, FilterSpec};

/// Total `SalesValue` per year, ascending.
pub fn sales_by_year(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<YearValue>> {
    totals_by_year(dataset, spec, columns::SALES_VALUE)
}

/// Total `Volume` per year, ascending.
pub fn volume_by_year(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<YearValue>> {
    totals_by_year(dataset, spec, columns::VOLUME)
}

fn totals_by_year(dataset: &Dataset, spec: &FilterSpec, measure: &str) -> Result<Vec<YearValue>> {
    if !dataset.has_columns(&[columns::YEAR, measure]) {
        return Ok(Vec::new());
    }
    let view = apply_filters(dataset, spec)?;
    let (Some(years), Some(values)) = (view.f64_column(columns::YEAR), view.f64_column(measure))
    else {
        return Ok(Vec::new());
    };

    Ok(group_sum(years.iter().map(truncate), values)
        .into_iter()
        .map(|(year, value)| YearValue { year, value })
        .collect())
}
