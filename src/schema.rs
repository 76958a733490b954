use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result};

/// Attribute keys every result record carries.
pub mod attr {
    pub const NAME: &str = "name";
    pub const RUN_TYPE: &str = "run_type";
    pub const ITERATIONS: &str = "iterations";
    pub const REAL_TIME: &str = "real_time";
    pub const CPU_TIME: &str = "cpu_time";
    pub const TIME_UNIT: &str = "time_unit";

    pub const WELL_KNOWN: [&str; 6] = [NAME, RUN_TYPE, ITERATIONS, REAL_TIME, CPU_TIME, TIME_UNIT];
}

/// Data-type tags seen in result names. Decoding does not enforce this
/// vocabulary; result files in the wild add their own tags.
pub mod dtype {
    pub const F32: &str = "f32";
    pub const C32: &str = "c32";
    pub const F64: &str = "f64";
    pub const C64: &str = "c64";
    pub const B8: &str = "b8";
    pub const S32: &str = "s32";
    pub const U32: &str = "u32";
    pub const U8: &str = "u8";
    pub const S64: &str = "s64";
    pub const U64: &str = "u64";
    pub const S16: &str = "s16";
    pub const U16: &str = "u16";

    pub const ALL: [&str; 12] = [F32, C32, F64, C64, B8, S32, U32, U8, S64, U64, S16, U16];
}

/// One result object from the `benchmarks` array, as it appears on disk.
///
/// Keys beyond the well-known six are kept verbatim in `extra` so callers
/// can still read counters the benchmark binary attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub run_type: String,
    pub iterations: u64,
    pub real_time: f64,
    pub cpu_time: f64,
    pub time_unit: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl RawRecord {
    /// All top-level JSON keys present on this record, sorted.
    pub fn attribute_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = attr::WELL_KNOWN.iter().map(|k| (*k).to_string()).collect();
        keys.extend(self.extra.keys().cloned());
        keys.sort();
        keys
    }

    /// Raw attribute lookup by key, typed fields included.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            attr::NAME => Some(Value::from(self.name.clone())),
            attr::RUN_TYPE => Some(Value::from(self.run_type.clone())),
            attr::ITERATIONS => Some(Value::from(self.iterations)),
            attr::REAL_TIME => Some(Value::from(self.real_time)),
            attr::CPU_TIME => Some(Value::from(self.cpu_time)),
            attr::TIME_UNIT => Some(Value::from(self.time_unit.clone())),
            _ => self.extra.get(key).cloned(),
        }
    }
}

/// A whole result document: the `context` block emitted by the benchmark
/// binary (kept opaque) and the ordered `benchmarks` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub benchmarks: Vec<RawRecord>,
}

impl BenchmarkFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
