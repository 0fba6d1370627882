use crate::aggregate::{group_sum, truncate, MonthlyPoint};
use crate::dataset::{columns, Dataset};
use crate::error::Result;
use crate::filter::{apply_filters, FilterSpec};

/// Total `SalesValue` per (year, month), ascending, labelled `YYYY-MM`.
pub fn monthly_trend(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<MonthlyPoint>> {
    if !dataset.has_columns(&[columns::YEAR, columns::MONTH, columns::SALES_VALUE]) {
        return Ok(Vec::new());
    }
    let view = apply_filters(dataset, spec)?;
    let (Some(years), Some(months), Some(sales)) = (
        view.f64_column(columns::YEAR),
        view.f64_column(columns::MONTH),
        view.f64_column(columns::SALES_VALUE),
    ) else {
        return Ok(Vec::new());
    };

    let keys = years
        .iter()
        .zip(months.iter())
        .map(|(y, m)| Some((truncate(y)?, truncate(m)?)));

    Ok(group_sum(keys, sales)
        .into_iter()
        .map(|((year, month_num), value)| MonthlyPoint {
            month: format!("{:04}-{:02}", year, month_num),
            year,
            month_num,
            value,
        })
        .collect())
}
