//! Decoded view over one raw result record.
//!
//! Result names encode `<benchmark>/<dtype>/<param>:<value>/...`; parameter
//! names may be bracketed (`[dim0]:4`). Decoding splits that grammar apart
//! once and keeps the raw record around for attribute passthrough.

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::schema::RawRecord;

#[derive(Debug, Clone)]
pub struct Record {
    raw: RawRecord,
    benchmark_name: String,
    dtype: String,
    params: IndexMap<String, i64>,
}

impl Record {
    /// Decode a raw record's name into benchmark identifier, dtype tag and
    /// parameter assignments. Malformed names fail here rather than
    /// surfacing as wrong values downstream.
    pub fn decode(raw: RawRecord) -> Result<Self> {
        let segments: Vec<&str> = raw.name.split('/').collect();
        if segments.len() < 2 {
            return Err(Error::TooFewSegments {
                name: raw.name.clone(),
                got: segments.len(),
            });
        }

        let benchmark_name = segments[0].to_string();
        let dtype = segments[1].to_string();

        let mut params = IndexMap::new();
        for segment in &segments[2..] {
            let (lhs, rhs) = segment.split_once(':').ok_or_else(|| Error::MissingSeparator {
                name: raw.name.clone(),
                segment: (*segment).to_string(),
            })?;
            let param = lhs.replace(['[', ']'], "");
            let value: i64 = rhs.parse().map_err(|_| Error::BadParamValue {
                name: raw.name.clone(),
                param: param.clone(),
                value: rhs.to_string(),
            })?;
            params.insert(param, value);
        }

        Ok(Self {
            raw,
            benchmark_name,
            dtype,
            params,
        })
    }

    pub fn benchmark_name(&self) -> &str {
        &self.benchmark_name
    }

    pub fn dtype(&self) -> &str {
        &self.dtype
    }

    /// Parameter assignments in name order.
    pub fn params(&self) -> &IndexMap<String, i64> {
        &self.params
    }

    /// Value of one parameter; the record not carrying it is an error.
    pub fn param(&self, param: &str) -> Result<i64> {
        self.params
            .get(param)
            .copied()
            .ok_or_else(|| Error::MissingParam {
                name: self.raw.name.clone(),
                param: param.to_string(),
            })
    }

    pub fn run_type(&self) -> &str {
        &self.raw.run_type
    }

    pub fn iterations(&self) -> u64 {
        self.raw.iterations
    }

    pub fn real_time(&self) -> f64 {
        self.raw.real_time
    }

    pub fn cpu_time(&self) -> f64 {
        self.raw.cpu_time
    }

    pub fn time_unit(&self) -> &str {
        &self.raw.time_unit
    }

    /// Raw attribute lookup on the underlying record.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        self.raw.attribute(key)
    }

    pub fn raw(&self) -> &RawRecord {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            run_type: "iteration".to_string(),
            iterations: 10,
            real_time: 2.0,
            cpu_time: 1.9,
            time_unit: "ns".to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_decode_full_name() {
        let rec = Record::decode(raw("b/dtype/p1:3/p2:7")).unwrap();
        assert_eq!(rec.benchmark_name(), "b");
        assert_eq!(rec.dtype(), "dtype");
        assert_eq!(rec.param("p1").unwrap(), 3);
        assert_eq!(rec.param("p2").unwrap(), 7);
        assert_eq!(rec.params().len(), 2);
    }

    #[test]
    fn test_decode_without_params() {
        let rec = Record::decode(raw("reduce/u8")).unwrap();
        assert_eq!(rec.benchmark_name(), "reduce");
        assert_eq!(rec.dtype(), "u8");
        assert!(rec.params().is_empty());
    }

    #[test]
    fn test_bracketed_and_plain_params_decode_identically() {
        let bracketed = Record::decode(raw("b/dtype/[p1]:3")).unwrap();
        let plain = Record::decode(raw("b/dtype/p1:3")).unwrap();
        assert_eq!(bracketed.params(), plain.params());
    }

    #[test]
    fn test_params_keep_name_order() {
        let rec = Record::decode(raw("b/f32/zz:1/aa:2/mm:3")).unwrap();
        let keys: Vec<&String> = rec.params().keys().collect();
        assert_eq!(keys, ["zz", "aa", "mm"]);
    }

    #[test]
    fn test_negative_param_value() {
        let rec = Record::decode(raw("b/f32/offset:-8")).unwrap();
        assert_eq!(rec.param("offset").unwrap(), -8);
    }

    #[test]
    fn test_too_few_segments() {
        let err = Record::decode(raw("just_a_name")).unwrap_err();
        assert!(matches!(err, Error::TooFewSegments { got: 1, .. }));
    }

    #[test]
    fn test_param_without_separator() {
        let err = Record::decode(raw("b/f32/dim0")).unwrap_err();
        assert!(matches!(err, Error::MissingSeparator { .. }));
    }

    #[test]
    fn test_non_integer_param_value() {
        let err = Record::decode(raw("b/f32/dim0:big")).unwrap_err();
        match err {
            Error::BadParamValue { param, value, .. } => {
                assert_eq!(param, "dim0");
                assert_eq!(value, "big");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_param_lookup() {
        let rec = Record::decode(raw("b/f32/dim0:4")).unwrap();
        assert!(matches!(
            rec.param("dim1").unwrap_err(),
            Error::MissingParam { .. }
        ));
    }

    #[test]
    fn test_field_passthrough() {
        let rec = Record::decode(raw("b/f32/dim0:4")).unwrap();
        assert_eq!(rec.run_type(), "iteration");
        assert_eq!(rec.iterations(), 10);
        assert_eq!(rec.real_time(), 2.0);
        assert_eq!(rec.cpu_time(), 1.9);
        assert_eq!(rec.time_unit(), "ns");
        assert_eq!(rec.attribute("name"), Some(serde_json::json!("b/f32/dim0:4")));
    }
}
