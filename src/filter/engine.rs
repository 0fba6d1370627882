use crate::dataset::{date_parser, utils, Dataset, FilteredView};
use crate::error::{Error, Result};
use crate::filter::{FilterSpec, FilterValue, Scalar};
use arrow::{
    array::{Array, ArrayRef, BooleanArray, Date32Array, Float64Array, StringArray},
    compute::filter_record_batch,
    datatypes::DataType,
};
use std::collections::HashSet;
use tracing::debug;

/// A filter value resolved against the type of the column it constrains.
#[derive(Debug, PartialEq)]
enum Predicate {
    Text(HashSet<String>),
    Number(Vec<f64>),
    Date(HashSet<i32>),
}

impl Predicate {
    fn coerce(column: &str, dtype: &DataType, value: &FilterValue) -> Result<Self> {
        let scalars = value.scalars();
        match dtype {
            DataType::Float64 => scalars
                .into_iter()
                .map(|s| coerce_number(column, s))
                .collect::<Result<Vec<_>>>()
                .map(Predicate::Number),
            DataType::Date32 => scalars
                .into_iter()
                .map(|s| coerce_date(column, s))
                .collect::<Result<HashSet<_>>>()
                .map(Predicate::Date),
            _ => Ok(Predicate::Text(
                scalars
                    .into_iter()
                    .map(|s| match s {
                        Scalar::Text(t) => utils::display_value(t),
                        Scalar::Number(n) => utils::format_number(*n),
                    })
                    .collect(),
            )),
        }
    }

    /// Clear `keep[i]` for every row whose value is null or not allowed.
    fn retain(&self, array: &ArrayRef, keep: &mut [bool]) {
        match self {
            Predicate::Number(allowed) => {
                if let Some(arr) = array.as_any().downcast_ref::<Float64Array>() {
                    for (k, v) in keep.iter_mut().zip(arr.iter()) {
                        *k &= v.is_some_and(|x| allowed.iter().any(|a| *a == x));
                    }
                }
            }
            Predicate::Date(allowed) => {
                if let Some(arr) = array.as_any().downcast_ref::<Date32Array>() {
                    for (k, v) in keep.iter_mut().zip(arr.iter()) {
                        *k &= v.is_some_and(|d| allowed.contains(&d));
                    }
                }
            }
            // both sides in display form, the way the catalog lists them
            Predicate::Text(allowed) => {
                if let Some(arr) = array.as_any().downcast_ref::<StringArray>() {
                    for (k, v) in keep.iter_mut().zip(arr.iter()) {
                        *k &= v.is_some_and(|s| allowed.contains(&utils::display_value(s)));
                    }
                }
            }
        }
    }
}

/// Numeric columns accept `2023`, `"2023"` and `"2023.0"` alike.
fn coerce_number(column: &str, s: &Scalar) -> Result<f64> {
    let v = match s {
        Scalar::Number(n) => Some(*n),
        Scalar::Text(t) => utils::parse_numeric(t),
    };
    v.filter(|x| x.is_finite())
        .ok_or_else(|| invalid(column, s, "a number"))
}

fn coerce_date(column: &str, s: &Scalar) -> Result<i32> {
    match s {
        Scalar::Text(t) => date_parser::parse_filter_date(t)
            .map(date_parser::to_date32)
            .ok_or_else(|| invalid(column, s, "a date (DD-MM-YYYY)")),
        Scalar::Number(_) => Err(invalid(column, s, "a date (DD-MM-YYYY)")),
    }
}

fn invalid(column: &str, s: &Scalar, expected: &'static str) -> Error {
    let value = match s {
        Scalar::Text(t) => t.clone(),
        Scalar::Number(n) => utils::format_number(*n),
    };
    Error::InvalidFilterValue {
        column: column.to_string(),
        value,
        expected,
    }
}

/// Apply `spec` to `dataset`, returning a new view.
///
/// Filters are ANDed. Columns the dataset lacks and empty values are skipped,
/// so an empty spec yields a copy of the full table. A value that cannot be
/// coerced to its column's type fails the whole query.
pub fn apply_filters(dataset: &Dataset, spec: &FilterSpec) -> Result<FilteredView> {
    let batch = dataset.batch();
    let mut keep = vec![true; batch.num_rows()];
    let mut applied = 0usize;

    for (column, value) in spec.iter() {
        if value.is_empty() {
            debug!(column = %column, "skipping empty filter");
            continue;
        }
        let Some(array) = batch.column_by_name(column) else {
            debug!(column = %column, "skipping filter on unknown column");
            continue;
        };
        let predicate = Predicate::coerce(column, array.data_type(), value)?;
        predicate.retain(array, &mut keep);
        applied += 1;
    }

    if applied == 0 {
        return Ok(FilteredView::new(batch.clone()));
    }

    let filtered = filter_record_batch(batch, &BooleanArray::from(keep))?;
    debug!(
        filters = applied,
        rows_in = batch.num_rows(),
        rows_out = filtered.num_rows(),
        "filters applied"
    );
    Ok(FilteredView::new(filtered))
}
