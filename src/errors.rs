//! Errors shared across the parsing and indexing layers.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as a benchmark result document")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode JSON for {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A result name did not contain the mandatory `benchmark/dtype` prefix.
    #[error("result name {name:?} has {got} '/'-separated segment(s), expected at least 2")]
    TooFewSegments { name: String, got: usize },

    /// A parameter segment of a result name had no `:` between name and value.
    #[error("parameter segment {segment:?} in result name {name:?} is missing a ':'")]
    MissingSeparator { name: String, segment: String },

    /// The value side of a parameter segment was not a base-10 integer.
    #[error("parameter {param:?} in result name {name:?} has non-integer value {value:?}")]
    BadParamValue {
        name: String,
        param: String,
        value: String,
    },

    #[error("no results named {benchmark:?} in the input file")]
    UnknownBenchmark { benchmark: String },

    #[error("benchmark {benchmark:?} has no data type {dtype:?}")]
    UnknownDtype { benchmark: String, dtype: String },

    #[error("benchmark {benchmark:?} has no parameter {param:?}")]
    UnknownParam { benchmark: String, param: String },

    /// A record lacked a parameter that the first record of its benchmark defined.
    #[error("result {name:?} is missing parameter {param:?}")]
    MissingParam { name: String, param: String },

    /// A filter constrained a parameter the target benchmark does not have.
    #[error("filter constrains {param:?}, which benchmark {benchmark:?} does not define")]
    FilterParam { benchmark: String, param: String },
}
