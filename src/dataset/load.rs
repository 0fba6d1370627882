use crate::dataset::{convert::convert_to_final_types, utils::clean_header};
use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::{io::Cursor, sync::Arc};
use tracing::debug;

/// Parse a CSV buffer into one normalized batch.
///
/// Every column is read as `Utf8` first so that a stray bad value never fails
/// the whole read; typing happens afterwards in `convert_to_final_types`.
/// Header names are cleaned and columns whose name cleans to nothing are dropped.
pub fn read_csv(data: &[u8]) -> Result<RecordBatch, ArrowError> {
    let (raw_schema, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(data), Some(0))?;
    if raw_schema.fields().is_empty() {
        return Err(ArrowError::CsvError("no header row".into()));
    }

    let names: Vec<String> = raw_schema
        .fields()
        .iter()
        .map(|f| clean_header(f.name()))
        .collect();
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(n, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_truncated_rows(true)
        .build(Cursor::new(data))?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let raw = concat_batches(&schema, &batches)?;

    let keep: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.is_empty())
        .map(|(i, _)| i)
        .collect();
    if keep.len() != names.len() {
        debug!(dropped = names.len() - keep.len(), "dropping unnamed columns");
    }
    let raw = raw.project(&keep)?;

    convert_to_final_types(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Float64Array, StringArray};

    #[test]
    fn test_headers_cleaned_and_types_applied() {
        let csv = "Brand , PackType,Year,SalesValue,date,\n\
                   A,Can,2023,10,01-01-2023,\n\
                   B,Bottle,2022,x,bad-date,\n";
        let batch = read_csv(csv.as_bytes()).unwrap();
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["Brand", "PackType", "Year", "SalesValue", "date"]);
        assert_eq!(batch.num_rows(), 2);

        let brand = batch
            .column_by_name("Brand")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(brand.value(1), "B");

        let sales = batch
            .column_by_name("SalesValue")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(sales.value(0), 10.0);
        assert!(sales.is_null(1));
        assert!(batch.column_by_name("date").unwrap().is_null(1));
    }

    #[test]
    fn test_short_rows_are_padded_with_nulls() {
        let csv = "Brand,Channel,Volume\nA,Retail,5\nB\n";
        let batch = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert!(batch.column_by_name("Volume").unwrap().is_null(1));
    }

    #[test]
    fn test_header_only_file_yields_empty_batch() {
        let batch = read_csv(b"Brand,Year\n").unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 2);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(read_csv(b"").is_err());
    }
}
