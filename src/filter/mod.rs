pub mod catalog;
pub mod engine;

pub use catalog::filter_options;
pub use engine::apply_filters;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single filter value as it arrives from a client: `2023`, `"2023.0"`, `"Brand 1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn is_empty(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Number(v as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    One(Scalar),
    Set(Vec<Scalar>),
}

impl FilterValue {
    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        FilterValue::Set(values.into_iter().map(Into::into).collect())
    }

    /// Null, blank text and empty sets constrain nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::One(s) => s.is_empty(),
            FilterValue::Set(v) => v.iter().all(Scalar::is_empty),
        }
    }

    /// The non-empty scalars this value allows.
    pub fn scalars(&self) -> Vec<&Scalar> {
        match self {
            FilterValue::Null => Vec::new(),
            FilterValue::One(s) => vec![s],
            FilterValue::Set(v) => v.iter().filter(|s| !s.is_empty()).collect(),
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(v: Scalar) -> Self {
        FilterValue::One(v)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::One(s.into())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::One(s.into())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::One(v.into())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::One(v.into())
    }
}

/// Column name → allowed value(s). Entries are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec(BTreeMap<String, FilterValue>);

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.0.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_values() {
        let spec: FilterSpec = serde_json::from_str(
            r#"{"Brand": ["A", "B"], "Year": "2023.0", "Month": 3, "Channel": null, "PPG": []}"#,
        )
        .unwrap();
        assert_eq!(spec.get("Brand"), Some(&FilterValue::set(["A", "B"])));
        assert_eq!(spec.get("Year"), Some(&FilterValue::from("2023.0")));
        assert_eq!(spec.get("Month"), Some(&FilterValue::from(3.0)));
        assert_eq!(spec.get("Channel"), Some(&FilterValue::Null));
        assert_eq!(spec.get("PPG"), Some(&FilterValue::Set(vec![])));
    }

    #[test]
    fn test_emptiness() {
        assert!(FilterValue::Null.is_empty());
        assert!(FilterValue::from("  ").is_empty());
        assert!(FilterValue::Set(vec![]).is_empty());
        assert!(FilterValue::set(["", " "]).is_empty());
        assert!(!FilterValue::from(0.0).is_empty());
        assert!(!FilterValue::set(["", "A"]).is_empty());
        assert_eq!(FilterValue::set(["", "A"]).scalars().len(), 1);
    }
}
