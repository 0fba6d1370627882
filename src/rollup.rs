use serde::{Deserialize, Serialize};

/// Recognises pre-aggregated rollup rows ("All Brands", "All Channels", ...)
/// that must not show up as a category of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupFilter {
    prefixes: Vec<String>,
}

impl RollupFilter {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn is_rollup(&self, value: &str) -> bool {
        self.prefixes.iter().any(|p| value.starts_with(p.as_str()))
    }
}

impl Default for RollupFilter {
    fn default() -> Self {
        Self::new(["All"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_all_prefix() {
        let f = RollupFilter::default();
        assert!(f.is_rollup("All Brands"));
        assert!(f.is_rollup("All"));
        assert!(!f.is_rollup("Brand 1"));
        assert!(!f.is_rollup("all brands"));
        assert!(!f.is_rollup("Small"));
    }

    #[test]
    fn test_custom_prefixes_and_empty_prefix_ignored() {
        let f = RollupFilter::new(["Total", ""]);
        assert_eq!(f, RollupFilter::new(["Total"]));
        assert!(f.is_rollup("Total Market"));
        assert!(!f.is_rollup("All Brands"));
        // an empty prefix would otherwise match every value
        assert!(!f.is_rollup("Brand 1"));
        assert!(!RollupFilter::new(Vec::<String>::new()).is_rollup("All Brands"));
    }
}
