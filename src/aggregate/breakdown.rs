use crate::aggregate::{category_totals, ChannelSales, PackTypeSales};
use crate::dataset::{columns, Dataset};
use crate::error::Result;
use crate::filter::{apply_filters, FilterSpec};

pub fn sales_by_channel(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<ChannelSales>> {
    Ok(sales_by_category(dataset, spec, columns::CHANNEL)?
        .into_iter()
        .map(|(channel, value)| ChannelSales { channel, value })
        .collect())
}

pub fn sales_by_pack_type(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<PackTypeSales>> {
    Ok(sales_by_category(dataset, spec, columns::PACK_TYPE)?
        .into_iter()
        .map(|(pack_type, value)| PackTypeSales { pack_type, value })
        .collect())
}

/// `SalesValue` per category of `column`, largest first, rollup rows dropped.
fn sales_by_category(dataset: &Dataset, spec: &FilterSpec, column: &str) -> Result<Vec<(String, f64)>> {
    if !dataset.has_columns(&[column, columns::SALES_VALUE]) {
        return Ok(Vec::new());
    }
    let view = apply_filters(dataset, spec)?;
    let (Some(keys), Some(sales)) = (view.str_column(column), view.f64_column(columns::SALES_VALUE))
    else {
        return Ok(Vec::new());
    };

    let rollup = dataset.rollup();
    Ok(category_totals(keys, sales)
        .into_iter()
        .filter(|(k, _)| !rollup.is_rollup(k))
        .collect())
}
