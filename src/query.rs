use crate::aggregate;
use crate::dashboard::compose_dashboard;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::filter_options;
use crate::response::QueryRequest;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// The queries a dashboard client can issue, named after their routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    FilterOptions,
    Dashboard,
    SalesByYear,
    VolumeByYear,
    MonthlyTrend,
    MarketShare,
    Summary,
    SalesByChannel,
    SalesByPackType,
}

impl Query {
    pub const ALL: [Query; 9] = [
        Query::FilterOptions,
        Query::Dashboard,
        Query::SalesByYear,
        Query::VolumeByYear,
        Query::MonthlyTrend,
        Query::MarketShare,
        Query::Summary,
        Query::SalesByChannel,
        Query::SalesByPackType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Query::FilterOptions => "filters",
            Query::Dashboard => "dashboard",
            Query::SalesByYear => "sales-by-year",
            Query::VolumeByYear => "volume-by-year",
            Query::MonthlyTrend => "monthly-trend",
            Query::MarketShare => "market-share",
            Query::Summary => "summary",
            Query::SalesByChannel => "sales-by-channel",
            Query::SalesByPackType => "sales-by-pack-type",
        }
    }

    /// Run against `dataset`, returning the `data` payload.
    pub fn execute(&self, dataset: &Dataset, req: &QueryRequest) -> Result<Value> {
        let spec = &req.filters;
        match self {
            Query::FilterOptions => to_value(filter_options(dataset)),
            Query::Dashboard => to_value(compose_dashboard(dataset, spec)?),
            Query::SalesByYear => to_value(aggregate::sales_by_year(dataset, spec)?),
            Query::VolumeByYear => to_value(aggregate::volume_by_year(dataset, spec)?),
            Query::MonthlyTrend => to_value(aggregate::monthly_trend(dataset, spec)?),
            Query::MarketShare => {
                to_value(aggregate::market_share(dataset, spec, req.metric()?)?)
            }
            Query::Summary => to_value(aggregate::summary_stats(dataset, spec)?),
            Query::SalesByChannel => to_value(aggregate::sales_by_channel(dataset, spec)?),
            Query::SalesByPackType => to_value(aggregate::sales_by_pack_type(dataset, spec)?),
        }
    }
}

impl FromStr for Query {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        Query::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| format!("unknown query {:?}", s))
    }
}

fn to_value<T: Serialize>(v: T) -> Result<Value> {
    Ok(serde_json::to_value(v)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CSV: &str = "Brand,Channel,PackType,Year,Month,SalesValue,Volume\n\
        A,Retail,Can,2022,1,100,10\n\
        B,Online,Can,2023,2,300,5\n";

    fn ds() -> Dataset {
        Dataset::from_csv_bytes(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for q in Query::ALL {
            assert_eq!(q.name().parse::<Query>().unwrap(), q);
        }
        assert_eq!("/market-share/".parse::<Query>().unwrap(), Query::MarketShare);
        assert!("health".parse::<Query>().is_err());
    }

    #[test]
    fn test_market_share_uses_metric() {
        let req = QueryRequest::from_json(r#"{"metric": "volume"}"#).unwrap();
        let v = Query::MarketShare.execute(&ds(), &req).unwrap();
        assert_eq!(v[0]["brand"], "A");
        assert_eq!(v[0]["value"], 10.0);

        let v = Query::MarketShare.execute(&ds(), &QueryRequest::default()).unwrap();
        assert_eq!(v[0]["brand"], "B");
    }

    #[test]
    fn test_sales_by_year_payload() {
        let req = QueryRequest::from_json(r#"{"filters": {"Brand": "A"}}"#).unwrap();
        let v = Query::SalesByYear.execute(&ds(), &req).unwrap();
        assert_eq!(v, json!([{"year": 2022, "value": 100.0}]));
    }

    #[test]
    fn test_filter_options_payload() {
        let v = Query::FilterOptions.execute(&ds(), &QueryRequest::default()).unwrap();
        assert_eq!(v["Year"], json!(["2022", "2023"]));
    }

    #[test]
    fn test_invalid_filter_surfaces_as_client_error() {
        let req = QueryRequest::from_json(r#"{"filters": {"Year": "someday"}}"#).unwrap();
        let err = Query::Summary.execute(&ds(), &req).unwrap_err();
        assert!(err.is_client_error());
    }
}
