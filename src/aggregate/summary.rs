use crate::aggregate::SummaryStats;
use crate::dataset::{columns, Dataset, FilteredView};
use crate::error::Result;
use crate::filter::{apply_filters, FilterSpec};
use arrow::compute;

/// Totals and means of sales and volume over the filtered rows.
///
/// A missing measure column reports 0 for its stats; `total_records` is
/// always the filtered row count.
pub fn summary_stats(dataset: &Dataset, spec: &FilterSpec) -> Result<SummaryStats> {
    let view = apply_filters(dataset, spec)?;
    let (total_sales, avg_sales) = sum_and_mean(&view, columns::SALES_VALUE);
    let (total_volume, avg_volume) = sum_and_mean(&view, columns::VOLUME);

    Ok(SummaryStats {
        total_sales,
        total_volume,
        total_records: view.num_rows(),
        avg_sales,
        avg_volume,
    })
}

fn sum_and_mean(view: &FilteredView, name: &str) -> (f64, f64) {
    let Some(values) = view.f64_column(name) else {
        return (0.0, 0.0);
    };
    let sum = compute::sum(values).unwrap_or(0.0);
    let count = view.count_valid(name);
    let mean = if count > 0 { sum / count as f64 } else { 0.0 };
    (sum, mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_skip_nulls() {
        let d = Dataset::from_csv_bytes(
            b"Brand,SalesValue,Volume\nA,10,1\nB,30,\nC,,3\nD,20,5\n",
        )
        .unwrap();
        let s = summary_stats(&d, &FilterSpec::new()).unwrap();
        assert_eq!(s.total_records, 4);
        assert_eq!(s.total_sales, 60.0);
        assert_eq!(s.avg_sales, 20.0);
        assert_eq!(s.total_volume, 9.0);
        assert_eq!(s.avg_volume, 3.0);
    }

    #[test]
    fn test_missing_volume_column_reports_zero() {
        let d = Dataset::from_csv_bytes(b"Brand,SalesValue\nA,10\nB,20\n").unwrap();
        let s = summary_stats(&d, &FilterSpec::new().with(columns::BRAND, "B")).unwrap();
        assert_eq!(
            s,
            SummaryStats {
                total_sales: 20.0,
                total_volume: 0.0,
                total_records: 1,
                avg_sales: 20.0,
                avg_volume: 0.0,
            }
        );
    }

    #[test]
    fn test_empty_view_has_zero_means() {
        let d = Dataset::from_csv_bytes(b"Brand,SalesValue,Volume\nA,10,1\n").unwrap();
        let s = summary_stats(&d, &FilterSpec::new().with(columns::BRAND, "Z")).unwrap();
        assert_eq!(s.total_records, 0);
        assert_eq!(s.avg_sales, 0.0);
        assert_eq!(s.avg_volume, 0.0);
        assert_eq!(s.total_sales, 0.0);
    }

    #[test]
    fn test_all_null_measure_sums_to_zero() {
        let d = Dataset::from_csv_bytes(b"Brand,SalesValue,Volume\nA,n/a,2\nB,,4\n").unwrap();
        let s = summary_stats(&d, &FilterSpec::new()).unwrap();
        assert_eq!(s.total_sales, 0.0);
        assert_eq!(s.avg_sales, 0.0);
        assert_eq!(s.total_volume, 6.0);
        assert_eq!(s.avg_volume, 3.0);
    }
}
