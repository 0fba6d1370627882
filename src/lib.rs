pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod query;
pub mod response;
pub mod rollup;

pub use config::AppConfig;
pub use dashboard::{compose_dashboard, Dashboard};
pub use dataset::{Dataset, DatasetStore, FilteredView};
pub use error::{Error, Result};
pub use filter::{apply_filters, filter_options, FilterSpec, FilterValue, Scalar};
pub use query::Query;
pub use rollup::RollupFilter;
