use crate::dataset::{columns, date_parser, utils};
use arrow::{
    array::{Array, ArrayRef, Date32Builder, Float64Builder, StringArray},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::debug;

/// Convert the all-string batch into its final column types.
///
/// - declared numeric columns → `Float64`, non-numeric values become null
/// - `date` → `Date32` parsed from `DD-MM-YYYY`, unparseable values become null
/// - everything else stays `Utf8`
pub fn convert_to_final_types(batch: &RecordBatch) -> Result<RecordBatch, ArrowError> {
    let schema = batch.schema();
    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut out = Vec::with_capacity(batch.num_columns());

    for (arr, fld) in batch.columns().iter().zip(schema.fields()) {
        let name = fld.name().as_str();
        let sarr = match arr.as_any().downcast_ref::<StringArray>() {
            Some(s) => s,
            None => {
                fields.push(fld.as_ref().clone());
                out.push(arr.clone());
                continue;
            }
        };

        if columns::is_numeric(name) {
            let mut b = Float64Builder::with_capacity(sarr.len());
            for opt in sarr.iter() {
                b.append_option(opt.and_then(utils::parse_numeric));
            }
            let col = b.finish();
            log_coerced(name, sarr, &col);
            fields.push(Field::new(name, DataType::Float64, true));
            out.push(Arc::new(col) as ArrayRef);
        } else if name == columns::DATE {
            let mut b = Date32Builder::with_capacity(sarr.len());
            for opt in sarr.iter() {
                let days = opt
                    .and_then(date_parser::parse_day_month_year)
                    .map(date_parser::to_date32);
                b.append_option(days);
            }
            let col = b.finish();
            log_coerced(name, sarr, &col);
            fields.push(Field::new(name, DataType::Date32, true));
            out.push(Arc::new(col) as ArrayRef);
        } else {
            fields.push(Field::new(name, DataType::Utf8, true));
            out.push(arr.clone());
        }
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), out)
}

fn log_coerced(name: &str, raw: &StringArray, converted: &dyn Array) {
    let coerced = converted.null_count().saturating_sub(raw.null_count());
    if coerced > 0 {
        debug!(column = name, coerced, "values coerced to null");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Date32Array, Float64Array};

    fn string_batch(cols: &[(&str, Vec<Option<&str>>)]) -> RecordBatch {
        let fields: Vec<Field> = cols
            .iter()
            .map(|(n, _)| Field::new(*n, DataType::Utf8, true))
            .collect();
        let arrays: Vec<ArrayRef> = cols
            .iter()
            .map(|(_, v)| Arc::new(StringArray::from(v.clone())) as ArrayRef)
            .collect();
        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
    }

    #[test]
    fn test_numeric_and_date_coercion() {
        let batch = string_batch(&[
            ("Brand", vec![Some("A"), Some("B"), None]),
            ("SalesValue", vec![Some("10.5"), Some("oops"), None]),
            ("date", vec![Some("01-03-2023"), Some("2023/03/01"), None]),
        ]);
        let out = convert_to_final_types(&batch).unwrap();

        assert_eq!(out.schema().field(0).data_type(), &DataType::Utf8);
        assert_eq!(out.schema().field(1).data_type(), &DataType::Float64);
        assert_eq!(out.schema().field(2).data_type(), &DataType::Date32);

        let sales = out
            .column(1)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(sales.value(0), 10.5);
        assert!(sales.is_null(1));
        assert!(sales.is_null(2));

        let dates = out
            .column(2)
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        assert!(dates.is_valid(0));
        assert!(dates.is_null(1));
        assert!(dates.is_null(2));
    }

    #[test]
    fn test_categorical_columns_untouched() {
        let batch = string_batch(&[("PPG", vec![Some("2023.0"), Some("X")])]);
        let out = convert_to_final_types(&batch).unwrap();
        let ppg = out
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(ppg.value(0), "2023.0");
    }
}
