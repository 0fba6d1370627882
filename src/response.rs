use crate::aggregate::MarketShareMetric;
use crate::error::Result;
use crate::filter::FilterSpec;
use serde::{Deserialize, Serialize};

/// `{success: true, data}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

/// Request body accepted by every query: `{"filters": {...}, "metric": "sales"}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub filters: FilterSpec,
    pub metric: Option<String>,
}

impl QueryRequest {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    /// Market-share metric, `sales` when absent.
    pub fn metric(&self) -> Result<MarketShareMetric> {
        match &self.metric {
            Some(m) => m.parse(),
            None => Ok(MarketShareMetric::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            message: "sales dashboard query engine is running",
        }
    }
}
