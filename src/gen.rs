//! Deterministic synthetic result files.
//!
//! Generates a complete benchmark document covering the cross-product of
//! power-of-two parameter values for every (benchmark, dtype) pair, with
//! seeded pseudo-random timings that grow with the total work. Useful as
//! dashboard demo input and as a fixture source for file-level tests.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use crate::errors::{Error, Result};
use crate::schema::{dtype, BenchmarkFile, RawRecord};

/// Configuration for synthetic result generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Benchmark identifiers to emit.
    pub benchmark_names: Vec<String>,
    /// Data-type tags emitted for every benchmark.
    pub dtypes: Vec<String>,
    /// Parameter names; every record carries all of them.
    pub params: Vec<String>,
    /// Distinct values per parameter (powers of two starting at 1).
    pub values_per_param: usize,
    /// Random seed for deterministic timings.
    pub seed: u64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            benchmark_names: vec!["fft1".to_string(), "fft2".to_string()],
            dtypes: vec![dtype::F32.to_string(), dtype::F64.to_string()],
            params: vec!["dim0".to_string(), "dim1".to_string()],
            values_per_param: 3,
            seed: 42,
        }
    }
}

/// Generate a full result document from `config`.
///
/// Records appear in a fixed nesting order (benchmark, dtype, then the
/// parameter cross-product), so two runs with the same config are
/// byte-identical.
pub fn generate_results(config: &GenerateConfig) -> BenchmarkFile {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let combos = config.values_per_param.pow(config.params.len() as u32);

    let mut benchmarks = Vec::new();
    for bench in &config.benchmark_names {
        for dt in &config.dtypes {
            for combo in 0..combos {
                let mut name = format!("{bench}/{dt}");
                let mut work = 1i64;
                let mut rem = combo;
                for param in &config.params {
                    let value = 1i64 << (rem % config.values_per_param);
                    rem /= config.values_per_param;
                    name.push_str(&format!("/{param}:{value}"));
                    work *= value;
                }

                // Timings scale with the parameter product plus jitter, so
                // plotted curves look like real measurements.
                let real_time = work as f64 * rng.gen_range(0.8..1.2);
                let cpu_time = real_time * rng.gen_range(0.85..1.0);
                benchmarks.push(RawRecord {
                    name,
                    run_type: "iteration".to_string(),
                    iterations: rng.gen_range(50u64..500),
                    real_time,
                    cpu_time,
                    time_unit: "ns".to_string(),
                    extra: serde_json::Map::new(),
                });
            }
        }
    }

    BenchmarkFile {
        context: Some(json!({ "generator": "benchviz", "seed": config.seed })),
        benchmarks,
    }
}

/// Write a result document to `path` as pretty-printed JSON.
pub fn write_results<P: AsRef<Path>>(path: P, file: &BenchmarkFile) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(file).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
