use crate::aggregate::{category_totals, BrandShare};
use crate::dataset::{columns, Dataset};
use crate::error::{Error, Result};
use crate::filter::{apply_filters, FilterSpec};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which measure a market-share query is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketShareMetric {
    #[default]
    Sales,
    Volume,
}

impl MarketShareMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketShareMetric::Sales => "sales",
            MarketShareMetric::Volume => "volume",
        }
    }

    fn column(&self) -> &'static str {
        match self {
            MarketShareMetric::Sales => columns::SALES_VALUE,
            MarketShareMetric::Volume => columns::VOLUME,
        }
    }
}

impl FromStr for MarketShareMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(MarketShareMetric::Sales),
            "volume" => Ok(MarketShareMetric::Volume),
            _ => Err(Error::InvalidMetric(s.to_string())),
        }
    }
}

impl fmt::Display for MarketShareMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn market_share_by_sales(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<BrandShare>> {
    market_share(dataset, spec, MarketShareMetric::Sales)
}

pub fn market_share_by_volume(dataset: &Dataset, spec: &FilterSpec) -> Result<Vec<BrandShare>> {
    market_share(dataset, spec, MarketShareMetric::Volume)
}

/// Per-brand totals with their percentage of the overall total, largest first.
///
/// The denominator includes rollup brands; only the output rows exclude them.
pub fn market_share(
    dataset: &Dataset,
    spec: &FilterSpec,
    metric: MarketShareMetric,
) -> Result<Vec<BrandShare>> {
    let measure = metric.column();
    if !dataset.has_columns(&[columns::BRAND, measure]) {
        return Ok(Vec::new());
    }
    let view = apply_filters(dataset, spec)?;
    let (Some(brands), Some(values)) = (view.str_column(columns::BRAND), view.f64_column(measure))
    else {
        return Ok(Vec::new());
    };

    let totals = category_totals(brands, values);
    let total: f64 = totals.iter().map(|(_, v)| v).sum();
    let rollup = dataset.rollup();

    Ok(totals
        .into_iter()
        .filter(|(brand, _)| !rollup.is_rollup(brand))
        .map(|(brand, value)| BrandShare {
            percentage: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            brand,
            value,
        })
        .collect())
}
