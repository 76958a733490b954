use clap::ValueEnum;

pub mod benchmark;
pub mod catalog;
pub mod errors;
pub mod filter;
pub mod gen;
pub mod record;
pub mod schema;

/// Which timing series to read from an aggregated benchmark.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum SeriesKind {
    /// Wall-clock time per measurement.
    #[default]
    RealTime,
    /// CPU time per measurement.
    CpuTime,
    /// Iteration counts.
    Iterations,
}

impl SeriesKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::RealTime => "real_time",
            SeriesKind::CpuTime => "cpu_time",
            SeriesKind::Iterations => "iterations",
        }
    }
}
