//! Whole-file view over a result document: which benchmarks exist, which
//! data types and parameters each one has, and which parameter values were
//! observed. This is what a dashboard needs to populate its selectors
//! before any series is collected.

use std::path::Path;

use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;

use crate::errors::{Error, Result};
use crate::record::Record;
use crate::schema::BenchmarkFile;

/// Distinct observed values (sorted after the scan) and running minimum
/// for one parameter, across all data types of its benchmark.
#[derive(Debug, Clone)]
struct ParamStats {
    values: Vec<i64>,
    min: i64,
}

#[derive(Debug, Clone)]
struct BenchmarkEntry {
    params: Vec<String>,
    dtypes: Vec<String>,
    stats: IndexMap<String, ParamStats>,
}

/// Catalog of one result file.
///
/// The first record of each benchmark fixes its parameter-name set; the
/// first record of the file fixes the attribute schema. Neither is
/// re-validated afterwards, matching how uniform benchmark binaries emit
/// their results.
#[derive(Debug, Clone)]
pub struct Catalog {
    names: Vec<String>,
    entries: IndexMap<String, BenchmarkEntry>,
    attributes: Vec<String>,
}

impl Catalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = BenchmarkFile::from_path(path)?;
        Self::from_file(&file)
    }

    pub fn from_file(file: &BenchmarkFile) -> Result<Self> {
        let mut attributes: Vec<String> = Vec::new();
        let mut first = true;
        let mut entries: IndexMap<String, BenchmarkEntry> = IndexMap::new();

        for raw in &file.benchmarks {
            if first {
                attributes = raw.attribute_keys();
                first = false;
            }

            let record = Record::decode(raw.clone())?;

            let entry = match entries.entry(record.benchmark_name().to_string()) {
                MapEntry::Occupied(occupied) => occupied.into_mut(),
                MapEntry::Vacant(vacant) => {
                    let mut params: Vec<String> = record.params().keys().cloned().collect();
                    params.sort();
                    let mut stats = IndexMap::new();
                    for param in &params {
                        stats.insert(
                            param.clone(),
                            ParamStats {
                                values: Vec::new(),
                                min: record.param(param)?,
                            },
                        );
                    }
                    vacant.insert(BenchmarkEntry {
                        params,
                        dtypes: Vec::new(),
                        stats,
                    })
                }
            };

            let dtype = record.dtype().to_string();
            if !entry.dtypes.contains(&dtype) {
                entry.dtypes.push(dtype);
            }

            for (param, stats) in entry.stats.iter_mut() {
                let value = record.param(param)?;
                if !stats.values.contains(&value) {
                    stats.values.push(value);
                }
                if value < stats.min {
                    stats.min = value;
                }
            }
        }

        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        for entry in entries.values_mut() {
            entry.dtypes.sort();
            for stats in entry.stats.values_mut() {
                stats.values.sort_unstable();
            }
        }

        Ok(Self {
            names,
            entries,
            attributes,
        })
    }

    /// Benchmark identifiers present in the file, sorted.
    pub fn benchmark_names(&self) -> &[String] {
        &self.names
    }

    /// Top-level JSON keys of the file's first record, sorted.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    fn entry(&self, benchmark: &str) -> Result<&BenchmarkEntry> {
        self.entries
            .get(benchmark)
            .ok_or_else(|| Error::UnknownBenchmark {
                benchmark: benchmark.to_string(),
            })
    }

    fn stats(&self, benchmark: &str, param: &str) -> Result<&ParamStats> {
        self.entry(benchmark)?
            .stats
            .get(param)
            .ok_or_else(|| Error::UnknownParam {
                benchmark: benchmark.to_string(),
                param: param.to_string(),
            })
    }

    /// Data types observed for one benchmark, sorted.
    pub fn dtypes(&self, benchmark: &str) -> Result<&[String]> {
        Ok(&self.entry(benchmark)?.dtypes)
    }

    /// Parameter names of one benchmark, sorted.
    pub fn params(&self, benchmark: &str) -> Result<&[String]> {
        Ok(&self.entry(benchmark)?.params)
    }

    /// Distinct values observed for one parameter across all data types of
    /// the benchmark, sorted.
    pub fn param_vals(&self, benchmark: &str, param: &str) -> Result<&[i64]> {
        Ok(&self.stats(benchmark, param)?.values)
    }

    /// Smallest value observed for one parameter across all data types of
    /// the benchmark.
    pub fn min_param_val(&self, benchmark: &str, param: &str) -> Result<i64> {
        Ok(self.stats(benchmark, param)?.min)
    }
}
