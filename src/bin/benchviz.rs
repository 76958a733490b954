use benchviz::benchmark::Benchmark;
use benchviz::catalog::Catalog;
use benchviz::errors::Result;
use benchviz::filter::Filter;
use benchviz::gen::{self, GenerateConfig};
use benchviz::SeriesKind;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a result file: benchmarks, data types, parameters, values.
    Info {
        /// Path to the benchmark result JSON file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Collect one plottable series from a result file as a JSON report.
    Series {
        /// Path to the benchmark result JSON file.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Benchmark identifier (first segment of the result names).
        #[arg(value_name = "BENCHMARK")]
        benchmark: String,

        /// Data-type tag to collect.
        #[arg(long)]
        dtype: String,

        /// Parameter whose values form the x axis.
        #[arg(long, value_name = "PARAM")]
        x: String,

        /// Series placed on the y axis.
        #[arg(long, value_enum, default_value_t = SeriesKind::RealTime)]
        y: SeriesKind,

        /// Equality constraint on a parameter; may be given multiple times.
        #[arg(long = "filter", value_name = "PARAM:VALUE", value_parser = parse_constraint)]
        filters: Vec<(String, i64)>,
    },

    /// Write a deterministic synthetic result file.
    Generate {
        /// Output path for the generated document.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: PathBuf,

        /// Random seed for deterministic timings.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Benchmark identifiers to emit. Can be provided multiple times.
        #[arg(long = "benchmark", value_name = "NAME", action = clap::ArgAction::Append)]
        benchmarks: Vec<String>,

        /// Data-type tags to emit. Can be provided multiple times.
        #[arg(long = "dtype", value_name = "TAG", action = clap::ArgAction::Append)]
        dtypes: Vec<String>,

        /// Parameter names encoded into every record. Can be provided multiple times.
        #[arg(long = "param", value_name = "NAME", action = clap::ArgAction::Append)]
        params: Vec<String>,

        /// Distinct values per parameter.
        #[arg(long, default_value_t = 3)]
        values: usize,
    },
}

#[derive(Parser, Debug)]
#[command(name = "benchviz")]
#[command(about = "Query Google-Benchmark-style JSON results for plotting")]
struct Args {
    /// Where to write JSON reports. If omitted, prints to stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

fn parse_constraint(s: &str) -> std::result::Result<(String, i64), String> {
    let (param, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected PARAM:VALUE, got {s:?}"))?;
    let value = value
        .parse()
        .map_err(|_| format!("value in {s:?} is not an integer"))?;
    Ok((param.to_string(), value))
}

/// One collected series, shaped for direct consumption by a plotting layer.
#[derive(Serialize)]
struct SeriesReport<'a> {
    benchmark: &'a str,
    dtype: &'a str,
    x_param: &'a str,
    y_series: &'a str,
    filter: &'a Filter,
    x: &'a [i64],
    y: Vec<f64>,
    time_units: &'a [String],
}

fn emit_report(out: Option<&PathBuf>, json: String) -> Result<()> {
    if let Some(path) = out {
        fs::write(path, json).map_err(|source| benchviz::errors::Error::Io {
            path: path.clone(),
            source,
        })?;
    } else {
        println!("{json}");
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match args.cmd {
        Command::Info { file } => {
            let catalog = Catalog::from_path(&file)?;

            println!("Result file: {}", file.display());
            println!("Attributes: {}", catalog.attributes().join(", "));
            for name in catalog.benchmark_names() {
                println!();
                println!("{name}");
                println!("  dtypes: {}", catalog.dtypes(name)?.join(", "));
                for param in catalog.params(name)? {
                    let vals: Vec<String> = catalog
                        .param_vals(name, param)?
                        .iter()
                        .map(i64::to_string)
                        .collect();
                    println!(
                        "  {param}: {} (min {})",
                        vals.join(", "),
                        catalog.min_param_val(name, param)?
                    );
                }
            }
        }

        Command::Series {
            file,
            benchmark,
            dtype,
            x,
            y,
            filters,
        } => {
            let filter: Filter = filters.into_iter().collect();
            let bench = Benchmark::from_path(&file, &benchmark, filter)?;

            let report = SeriesReport {
                benchmark: bench.name(),
                dtype: &dtype,
                x_param: &x,
                y_series: y.as_str(),
                filter: bench.filter(),
                x: bench.param_vals(&x, &dtype)?,
                y: bench.timings(y, &dtype)?,
                time_units: bench.time_units(&dtype)?,
            };

            let json = serde_json::to_string_pretty(&report).map_err(|source| {
                benchviz::errors::Error::Encode {
                    path: file.clone(),
                    source,
                }
            })?;
            emit_report(args.out.as_ref(), json)?;
        }

        Command::Generate {
            output,
            seed,
            benchmarks,
            dtypes,
            params,
            values,
        } => {
            let defaults = GenerateConfig::default();
            let config = GenerateConfig {
                benchmark_names: if benchmarks.is_empty() {
                    defaults.benchmark_names
                } else {
                    benchmarks
                },
                dtypes: if dtypes.is_empty() {
                    defaults.dtypes
                } else {
                    dtypes
                },
                params: if params.is_empty() {
                    defaults.params
                } else {
                    params
                },
                values_per_param: values,
                seed,
            };

            let file = gen::generate_results(&config);
            gen::write_results(&output, &file)?;

            eprintln!("Wrote {} records to {}", file.benchmarks.len(), output.display());
            eprintln!("  Benchmarks: {}", config.benchmark_names.join(", "));
            eprintln!("  Dtypes: {}", config.dtypes.join(", "));
            eprintln!("  Params: {}", config.params.join(", "));
            eprintln!("  Seed: {seed}");
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
