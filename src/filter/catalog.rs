use crate::dataset::{date_parser, utils, Dataset};
use arrow::array::{Array, ArrayRef, Date32Array, Float64Array, StringArray};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct display values per filterable column.
///
/// Nulls and rollup rows are dropped, numeric-looking values lose a trailing
/// `.0`, and each list is sorted. Columns missing from the dataset are omitted.
pub fn filter_options(dataset: &Dataset) -> BTreeMap<String, Vec<String>> {
    let batch = dataset.batch();
    let rollup = dataset.rollup();
    let mut out = BTreeMap::new();

    for col in dataset.filter_columns() {
        let Some(array) = batch.column_by_name(col) else {
            continue;
        };
        let values: BTreeSet<String> = string_values(array)
            .into_iter()
            .filter(|v| !rollup.is_rollup(v))
            .map(|v| utils::display_value(&v))
            .collect();
        out.insert(col.clone(), values.into_iter().collect());
    }

    out
}

/// Non-null values of `array` rendered as strings.
fn string_values(array: &ArrayRef) -> Vec<String> {
    if let Some(arr) = array.as_any().downcast_ref::<StringArray>() {
        arr.iter().flatten().map(str::to_string).collect()
    } else if let Some(arr) = array.as_any().downcast_ref::<Float64Array>() {
        arr.iter().flatten().map(utils::format_number).collect()
    } else if let Some(arr) = array.as_any().downcast_ref::<Date32Array>() {
        arr.iter()
            .flatten()
            .filter_map(date_parser::from_date32)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    } else {
        Vec::new()
    }
}
