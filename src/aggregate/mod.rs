//! Named dashboard aggregations.
//!
//! Every aggregation takes `(dataset, spec)`, filters on its own and is total:
//! a missing column yields an empty result, never an error. The only failures
//! are invalid filter values.

pub mod breakdown;
pub mod by_year;
pub mod share;
pub mod summary;
pub mod trend;

pub use breakdown::{sales_by_channel, sales_by_pack_type};
pub use by_year::{sales_by_year, volume_by_year};
pub use share::{market_share, market_share_by_sales, market_share_by_volume, MarketShareMetric};
pub use summary::summary_stats;
pub use trend::monthly_trend;

use arrow::array::{Float64Array, StringArray};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub month: String,
    pub year: i64,
    pub month_num: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandShare {
    pub brand: String,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_sales: f64,
    pub total_volume: f64,
    pub total_records: usize,
    pub avg_sales: f64,
    pub avg_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSales {
    pub channel: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackTypeSales {
    pub pack_type: String,
    pub value: f64,
}

/// Integer part of a year/month value; `None` for nulls and non-finite values.
pub(crate) fn truncate(v: Option<f64>) -> Option<i64> {
    v.filter(|x| x.is_finite()).map(|x| x.trunc() as i64)
}

/// Sum `measure` per key. Rows with a null key are dropped; null measures add
/// nothing, so a group whose measures are all null sums to 0.
pub(crate) fn group_sum<K, I>(keys: I, measure: &Float64Array) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = Option<K>>,
{
    let mut groups = BTreeMap::new();
    for (key, m) in keys.into_iter().zip(measure.iter()) {
        let Some(key) = key else { continue };
        let slot = groups.entry(key).or_insert(0.0);
        if let Some(m) = m {
            *slot += m;
        }
    }
    groups
}

/// Sum `measure` per category of a string column, largest first.
/// Ties keep ascending category order.
pub(crate) fn category_totals(keys: &StringArray, measure: &Float64Array) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = group_sum(
        keys.iter().map(|k| k.map(str::to_string)),
        measure,
    )
    .into_iter()
    .collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sum_skips_null_keys_and_measures() {
        let keys = vec![Some(1), Some(1), None, Some(2)];
        let measure = Float64Array::from(vec![Some(1.0), None, Some(5.0), None]);
        let groups = group_sum(keys, &measure);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&1], 1.0);
        assert_eq!(groups[&2], 0.0);
    }

    #[test]
    fn test_category_totals_sorted_descending() {
        let keys = StringArray::from(vec![Some("b"), Some("a"), Some("c"), Some("b")]);
        let measure = Float64Array::from(vec![1.0, 3.0, 3.0, 1.0]);
        let totals = category_totals(&keys, &measure);
        assert_eq!(
            totals,
            vec![("a".to_string(), 3.0), ("c".to_string(), 3.0), ("b".to_string(), 2.0)]
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(Some(2023.0)), Some(2023));
        assert_eq!(truncate(Some(3.9)), Some(3));
        assert_eq!(truncate(Some(f64::INFINITY)), None);
        assert_eq!(truncate(None), None);
    }
}
