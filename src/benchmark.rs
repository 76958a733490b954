//! Per-benchmark aggregation: one pass over a result file, collecting the
//! timing series for a single benchmark identifier, split by data type.

use std::path::Path;

use indexmap::IndexMap;

use crate::errors::{Error, Result};
use crate::filter::Filter;
use crate::record::Record;
use crate::schema::BenchmarkFile;
use crate::SeriesKind;

/// Parallel sequences for one data type, in file order. Every record that
/// passed the filter contributes one entry to each.
#[derive(Debug, Clone)]
struct Series {
    param_vals: IndexMap<String, Vec<i64>>,
    run_types: Vec<String>,
    iterations: Vec<u64>,
    real_times: Vec<f64>,
    cpu_times: Vec<f64>,
    time_units: Vec<String>,
}

impl Series {
    fn empty(params: &[String]) -> Self {
        Self {
            param_vals: params.iter().map(|p| (p.clone(), Vec::new())).collect(),
            run_types: Vec::new(),
            iterations: Vec::new(),
            real_times: Vec::new(),
            cpu_times: Vec::new(),
            time_units: Vec::new(),
        }
    }

    fn push(&mut self, record: &Record) -> Result<()> {
        for (param, vals) in self.param_vals.iter_mut() {
            vals.push(record.param(param)?);
        }
        self.run_types.push(record.run_type().to_string());
        self.iterations.push(record.iterations());
        self.real_times.push(record.real_time());
        self.cpu_times.push(record.cpu_time());
        self.time_units.push(record.time_unit().to_string());
        Ok(())
    }
}

/// All series of one benchmark within one result file, ready for plotting.
///
/// The parameter-name set is fixed by the first record carrying the target
/// benchmark identifier; data types are discovered as the scan runs. A data
/// type whose records all fail the filter still shows up in [`dtypes`]
/// (with empty series), so a dashboard can offer it for selection.
///
/// [`dtypes`]: Benchmark::dtypes
#[derive(Debug, Clone)]
pub struct Benchmark {
    name: String,
    filter: Filter,
    dtypes: Vec<String>,
    params: Vec<String>,
    series: IndexMap<String, Series>,
}

impl Benchmark {
    /// Load a result file and aggregate the records named `name`.
    pub fn from_path<P: AsRef<Path>>(path: P, name: &str, filter: Filter) -> Result<Self> {
        let file = BenchmarkFile::from_path(path)?;
        Self::from_file(&file, name, filter)
    }

    /// Aggregate from an already-parsed document.
    ///
    /// Fails if no record carries `name`, if any record's name is malformed,
    /// or if the filter constrains a parameter the benchmark does not have.
    pub fn from_file(file: &BenchmarkFile, name: &str, filter: Filter) -> Result<Self> {
        let mut first = true;
        let mut params: Vec<String> = Vec::new();
        let mut dtypes: Vec<String> = Vec::new();
        let mut series: IndexMap<String, Series> = IndexMap::new();

        for raw in &file.benchmarks {
            let record = Record::decode(raw.clone())?;
            if record.benchmark_name() != name {
                continue;
            }

            // The first matching record is authoritative for the parameter
            // set; the filter is checked against it right away so a typo'd
            // constraint fails the build instead of emptying every series.
            if first {
                params = record.params().keys().cloned().collect();
                params.sort();
                for constrained in filter.params() {
                    if !params.iter().any(|have| have == constrained) {
                        return Err(Error::FilterParam {
                            benchmark: name.to_string(),
                            param: constrained.to_string(),
                        });
                    }
                }
                first = false;
            }

            // Data types register on first sight, before the filter check.
            if !series.contains_key(record.dtype()) {
                dtypes.push(record.dtype().to_string());
            }
            let slot = series
                .entry(record.dtype().to_string())
                .or_insert_with(|| Series::empty(&params));

            if filter.matches(record.params()) {
                slot.push(&record)?;
            }
        }

        if first {
            return Err(Error::UnknownBenchmark {
                benchmark: name.to_string(),
            });
        }

        dtypes.sort();

        Ok(Self {
            name: name.to_string(),
            filter,
            dtypes,
            params,
            series,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Data types observed for this benchmark, sorted.
    pub fn dtypes(&self) -> &[String] {
        &self.dtypes
    }

    /// Canonical parameter names, sorted.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    fn series(&self, dtype: &str) -> Result<&Series> {
        self.series.get(dtype).ok_or_else(|| Error::UnknownDtype {
            benchmark: self.name.clone(),
            dtype: dtype.to_string(),
        })
    }

    /// Values of one parameter for every filtered record of `dtype`, in
    /// file order.
    pub fn param_vals(&self, param: &str, dtype: &str) -> Result<&[i64]> {
        let series = self.series(dtype)?;
        series
            .param_vals
            .get(param)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownParam {
                benchmark: self.name.clone(),
                param: param.to_string(),
            })
    }

    pub fn run_types(&self, dtype: &str) -> Result<&[String]> {
        Ok(&self.series(dtype)?.run_types)
    }

    pub fn iterations(&self, dtype: &str) -> Result<&[u64]> {
        Ok(&self.series(dtype)?.iterations)
    }

    pub fn real_times(&self, dtype: &str) -> Result<&[f64]> {
        Ok(&self.series(dtype)?.real_times)
    }

    pub fn cpu_times(&self, dtype: &str) -> Result<&[f64]> {
        Ok(&self.series(dtype)?.cpu_times)
    }

    pub fn time_units(&self, dtype: &str) -> Result<&[String]> {
        Ok(&self.series(dtype)?.time_units)
    }

    /// The chosen series converted to `f64`, for plot axes.
    pub fn timings(&self, kind: SeriesKind, dtype: &str) -> Result<Vec<f64>> {
        let series = self.series(dtype)?;
        Ok(match kind {
            SeriesKind::RealTime => series.real_times.clone(),
            SeriesKind::CpuTime => series.cpu_times.clone(),
            SeriesKind::Iterations => series.iterations.iter().map(|&n| n as f64).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawRecord;

    fn record(name: &str, real_time: f64) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            run_type: "iteration".to_string(),
            iterations: 100,
            real_time,
            cpu_time: real_time * 0.9,
            time_unit: "us".to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn file(names: &[&str]) -> BenchmarkFile {
        BenchmarkFile {
            context: None,
            benchmarks: names
                .iter()
                .enumerate()
                .map(|(i, n)| record(n, (i + 1) as f64))
                .collect(),
        }
    }

    #[test]
    fn test_filtered_series() {
        // The worked example: three fft1 records, two surviving the filter.
        let file = file(&[
            "fft1/f32/dim0:4/dim1:1/dim2:1",
            "fft1/f32/dim0:8/dim1:1/dim2:1",
            "fft1/f32/dim0:4/dim1:2/dim2:1",
        ]);
        let filter = Filter::new().with("dim1", 1).with("dim2", 1);
        let bench = Benchmark::from_file(&file, "fft1", filter).unwrap();

        assert_eq!(bench.param_vals("dim0", "f32").unwrap(), [4, 8]);
        assert_eq!(bench.real_times("f32").unwrap(), [1.0, 2.0]);
    }

    #[test]
    fn test_empty_filter_reproduces_file_order() {
        let file = file(&[
            "fft1/f32/dim0:32/dim1:1",
            "other/f32/dim0:1",
            "fft1/f32/dim0:4/dim1:1",
            "fft1/f32/dim0:16/dim1:2",
        ]);
        let bench = Benchmark::from_file(&file, "fft1", Filter::new()).unwrap();

        assert_eq!(bench.param_vals("dim0", "f32").unwrap(), [32, 4, 16]);
        assert_eq!(bench.param_vals("dim1", "f32").unwrap(), [1, 1, 2]);
        assert_eq!(bench.real_times("f32").unwrap(), [1.0, 3.0, 4.0]);
        assert_eq!(bench.iterations("f32").unwrap(), [100, 100, 100]);
        assert_eq!(bench.run_types("f32").unwrap(), ["iteration"; 3]);
        assert_eq!(bench.time_units("f32").unwrap(), ["us"; 3]);
    }

    #[test]
    fn test_params_fixed_by_first_record_and_sorted() {
        let file = file(&["fft1/f32/dim1:1/dim0:4"]);
        let bench = Benchmark::from_file(&file, "fft1", Filter::new()).unwrap();
        assert_eq!(bench.params(), ["dim0", "dim1"]);
    }

    #[test]
    fn test_dtypes_sorted_and_registered_before_filter() {
        // All u8 records fail the filter; the dtype must still be listed.
        let file = file(&[
            "fft1/u8/dim0:4",
            "fft1/f32/dim0:8",
            "fft1/c64/dim0:8",
        ]);
        let filter = Filter::new().with("dim0", 8);
        let bench = Benchmark::from_file(&file, "fft1", filter).unwrap();

        assert_eq!(bench.dtypes(), ["c64", "f32", "u8"]);
        assert!(bench.param_vals("dim0", "u8").unwrap().is_empty());
        assert_eq!(bench.param_vals("dim0", "f32").unwrap(), [8]);
    }

    #[test]
    fn test_unknown_benchmark() {
        let file = file(&["fft1/f32/dim0:4"]);
        let err = Benchmark::from_file(&file, "fft9", Filter::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownBenchmark { .. }));
    }

    #[test]
    fn test_filter_on_unknown_param_is_rejected() {
        let file = file(&["fft1/f32/dim0:4"]);
        let filter = Filter::new().with("dim7", 1);
        let err = Benchmark::from_file(&file, "fft1", filter).unwrap_err();
        match err {
            Error::FilterParam { benchmark, param } => {
                assert_eq!(benchmark, "fft1");
                assert_eq!(param, "dim7");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_dtype_and_param_lookups() {
        let file = file(&["fft1/f32/dim0:4"]);
        let bench = Benchmark::from_file(&file, "fft1", Filter::new()).unwrap();

        assert!(matches!(
            bench.real_times("f64").unwrap_err(),
            Error::UnknownDtype { .. }
        ));
        assert!(matches!(
            bench.param_vals("dim9", "f32").unwrap_err(),
            Error::UnknownParam { .. }
        ));
    }

    #[test]
    fn test_record_missing_canonical_param() {
        let file = file(&["fft1/f32/dim0:4/dim1:1", "fft1/f32/dim0:8"]);
        let err = Benchmark::from_file(&file, "fft1", Filter::new()).unwrap_err();
        assert!(matches!(err, Error::MissingParam { .. }));
    }

    #[test]
    fn test_malformed_name_fails_the_build() {
        let file = file(&["fft1/f32/dim0:4", "oops"]);
        let err = Benchmark::from_file(&file, "fft1", Filter::new()).unwrap_err();
        assert!(matches!(err, Error::TooFewSegments { .. }));
    }

    #[test]
    fn test_timings_kinds() {
        let file = file(&["fft1/f32/dim0:4", "fft1/f32/dim0:8"]);
        let bench = Benchmark::from_file(&file, "fft1", Filter::new()).unwrap();

        assert_eq!(
            bench.timings(SeriesKind::RealTime, "f32").unwrap(),
            [1.0, 2.0]
        );
        assert_eq!(
            bench.timings(SeriesKind::CpuTime, "f32").unwrap(),
            [0.9, 1.8]
        );
        assert_eq!(
            bench.timings(SeriesKind::Iterations, "f32").unwrap(),
            [100.0, 100.0]
        );
    }

    #[test]
    fn test_from_path_round_trip() {
        let file = file(&["fft1/f32/dim0:4", "fft1/f32/dim0:8"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let bench = Benchmark::from_path(&path, "fft1", Filter::new()).unwrap();
        assert_eq!(bench.param_vals("dim0", "f32").unwrap(), [4, 8]);
    }
}
