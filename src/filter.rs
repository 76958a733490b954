//! Equality constraints used to narrow a benchmark's records down to one
//! curve before collecting its series.

use indexmap::IndexMap;
use serde::Serialize;

/// Parameter name to required value. A record passes iff every constrained
/// parameter is present and equal; the empty filter passes everything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Filter {
    constraints: IndexMap<String, i64>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constraint addition.
    pub fn with(mut self, param: impl Into<String>, value: i64) -> Self {
        self.constraints.insert(param.into(), value);
        self
    }

    pub fn insert(&mut self, param: impl Into<String>, value: i64) {
        self.constraints.insert(param.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.constraints.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Conjunction over the constraints, short-circuiting on the first
    /// failure. A missing parameter is a non-pass, not an error; whether a
    /// filter may name unknown parameters at all is decided by the caller
    /// (see `Benchmark::from_file`).
    pub fn matches(&self, params: &IndexMap<String, i64>) -> bool {
        self.constraints
            .iter()
            .all(|(param, required)| params.get(param) == Some(required))
    }
}

impl FromIterator<(String, i64)> for Filter {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, i64)]) -> IndexMap<String, i64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = Filter::new();
        assert!(filter.matches(&params(&[("dim0", 4)])));
        assert!(filter.matches(&params(&[])));
    }

    #[test]
    fn test_equality_match() {
        let filter = Filter::new().with("dim1", 1).with("dim2", 1);
        assert!(filter.matches(&params(&[("dim0", 4), ("dim1", 1), ("dim2", 1)])));
        assert!(!filter.matches(&params(&[("dim0", 4), ("dim1", 2), ("dim2", 1)])));
    }

    #[test]
    fn test_missing_param_is_a_non_pass() {
        let filter = Filter::new().with("dim3", 1);
        assert!(!filter.matches(&params(&[("dim0", 4)])));
    }

    #[test]
    fn test_constraint_order_does_not_matter() {
        let ab = Filter::new().with("p1", 3).with("p2", 7);
        let ba = Filter::new().with("p2", 7).with("p1", 3);
        let hit = params(&[("p1", 3), ("p2", 7)]);
        let miss = params(&[("p1", 3), ("p2", 8)]);
        assert_eq!(ab.matches(&hit), ba.matches(&hit));
        assert_eq!(ab.matches(&miss), ba.matches(&miss));
    }

    #[test]
    fn test_from_iterator() {
        let filter: Filter = vec![("dim1".to_string(), 1), ("dim2".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(filter.len(), 2);
        assert!(filter.matches(&params(&[("dim1", 1), ("dim2", 1)])));
    }
}
