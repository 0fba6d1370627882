use crate::aggregate::{
    self, BrandShare, ChannelSales, MonthlyPoint, PackTypeSales, SummaryStats, YearValue,
};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::FilterSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every dashboard view for one filter spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub sales_by_year: Vec<YearValue>,
    pub volume_by_year: Vec<YearValue>,
    pub monthly_trend: Vec<MonthlyPoint>,
    pub market_share_sales: Vec<BrandShare>,
    pub market_share_volume: Vec<BrandShare>,
    pub summary_stats: SummaryStats,
    pub sales_by_channel: Vec<ChannelSales>,
    pub sales_by_pack_type: Vec<PackTypeSales>,
}

/// Run each aggregation independently against `spec`. The first failure is returned as is.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compose_dashboard(dataset: &Dataset, spec: &FilterSpec) -> Result<Dashboard> {
    let dashboard = Dashboard {
        sales_by_year: aggregate::sales_by_year(dataset, spec)?,
        volume_by_year: aggregate::volume_by_year(dataset, spec)?,
        monthly_trend: aggregate::monthly_trend(dataset, spec)?,
        market_share_sales: aggregate::market_share_by_sales(dataset, spec)?,
        market_share_volume: aggregate::market_share_by_volume(dataset, spec)?,
        summary_stats: aggregate::summary_stats(dataset, spec)?,
        sales_by_channel: aggregate::sales_by_channel(dataset, spec)?,
        sales_by_pack_type: aggregate::sales_by_pack_type(dataset, spec)?,
    };
    debug!(
        records = dashboard.summary_stats.total_records,
        "dashboard composed"
    );
    Ok(dashboard)
}
